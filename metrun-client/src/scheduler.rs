//! Scheduler client abstraction
//!
//! The run monitor only depends on this trait, so it can be driven by the
//! HTTP client in production and by scripted clients in tests.

use async_trait::async_trait;
use metrun_core::domain::history::JobHistory;
use metrun_core::domain::job::JobDefinition;
use metrun_core::domain::run::{RunHandle, RunStatus};

use crate::error::Result;

/// Stateless request/response access to the job scheduling service
///
/// Every call is independent. Implementations must not cache responses.
#[async_trait]
pub trait SchedulerClient: Send + Sync {
    /// Lists the job definitions known to the service
    async fn list_jobs(&self) -> Result<Vec<JobDefinition>>;

    /// Starts a new run of the named job
    ///
    /// Creates a run on the remote service; callers must invoke it once per
    /// monitoring session.
    async fn start_job(&self, job_name: &str) -> Result<RunHandle>;

    /// Fetches the live status of a run
    ///
    /// Fails when the run is no longer in the live set or on transport errors.
    async fn get_run_status(&self, job_name: &str, run_id: &str) -> Result<RunStatus>;

    /// Fetches the finished-run history of a job
    ///
    /// Fails when the job has no history object at all.
    async fn get_job_history(&self, job_name: &str) -> Result<JobHistory>;
}
