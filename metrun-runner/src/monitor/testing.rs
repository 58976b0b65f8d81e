//! Scripted scheduler client for monitor tests

use async_trait::async_trait;
use metrun_client::{ClientError, Result, SchedulerClient};
use metrun_core::domain::history::{HistoryOutcome, HistoryRecord, JobHistory};
use metrun_core::domain::job::JobDefinition;
use metrun_core::domain::run::{RunHandle, RunState, RunStatus};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Scripted answer to a status query
#[derive(Debug, Clone)]
pub enum StatusReply {
    State(RunState),
    NotFound,
    Unavailable,
}

/// Scripted answer to a history query
#[derive(Debug, Clone)]
pub enum HistoryReply {
    Found(JobHistory),
    Missing,
    Unavailable,
}

/// In-memory client answering from a script and counting calls
///
/// Once the status script runs dry every further query reports `Running`.
pub struct ScriptedClient {
    run_id: Option<String>,
    list_fails: bool,
    status_delay: Option<Duration>,
    statuses: Mutex<VecDeque<StatusReply>>,
    history: HistoryReply,
    pub list_calls: AtomicUsize,
    pub start_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
    pub history_calls: AtomicUsize,
}

impl ScriptedClient {
    /// Client whose launch returns `run_id`
    pub fn launching(run_id: &str) -> Self {
        Self {
            run_id: Some(run_id.to_string()),
            list_fails: false,
            status_delay: None,
            statuses: Mutex::new(VecDeque::new()),
            history: HistoryReply::Unavailable,
            list_calls: AtomicUsize::new(0),
            start_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            history_calls: AtomicUsize::new(0),
        }
    }

    /// Client whose launch is rejected
    pub fn rejecting() -> Self {
        Self {
            run_id: None,
            ..Self::launching("")
        }
    }

    pub fn with_statuses(self, statuses: impl IntoIterator<Item = StatusReply>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into_iter().collect();
        self
    }

    pub fn with_history(mut self, history: HistoryReply) -> Self {
        self.history = history;
        self
    }

    pub fn with_failing_list(mut self) -> Self {
        self.list_fails = true;
        self
    }

    pub fn with_status_delay(mut self, delay: Duration) -> Self {
        self.status_delay = Some(delay);
        self
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SchedulerClient for ScriptedClient {
    async fn list_jobs(&self) -> Result<Vec<JobDefinition>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.list_fails {
            return Err(ClientError::status(401, "unauthorized"));
        }
        Ok(vec![JobDefinition {
            id: "nightly-etl".to_string(),
            description: None,
        }])
    }

    async fn start_job(&self, job_name: &str) -> Result<RunHandle> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        match &self.run_id {
            Some(run_id) => Ok(RunHandle::new(job_name, run_id.clone())),
            None => Err(ClientError::status(404, "job does not exist")),
        }
    }

    async fn get_run_status(&self, _job_name: &str, run_id: &str) -> Result<RunStatus> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.status_delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(StatusReply::State(RunState::Running));

        match reply {
            StatusReply::State(state) => Ok(RunStatus {
                run_id: run_id.to_string(),
                state,
                remote_status: state.to_string().to_uppercase(),
                created_at: None,
            }),
            StatusReply::NotFound => Err(ClientError::status(404, "run not found")),
            StatusReply::Unavailable => Err(ClientError::status(503, "service unavailable")),
        }
    }

    async fn get_job_history(&self, job_name: &str) -> Result<JobHistory> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        match &self.history {
            HistoryReply::Found(history) => Ok(history.clone()),
            HistoryReply::Missing => Err(ClientError::MissingHistory(job_name.to_string())),
            HistoryReply::Unavailable => Err(ClientError::status(503, "service unavailable")),
        }
    }
}

/// History holding the given successful and failed run ids
pub fn history(successful: &[&str], failed: &[&str]) -> JobHistory {
    let records = |ids: &[&str], outcome| {
        ids.iter()
            .map(|id| HistoryRecord {
                run_id: id.to_string(),
                outcome,
                created_at: None,
                finished_at: None,
            })
            .collect::<Vec<_>>()
    };

    JobHistory {
        success_count: successful.len() as u64,
        failure_count: failed.len() as u64,
        successful_runs: records(successful, HistoryOutcome::Succeeded),
        failed_runs: records(failed, HistoryOutcome::Failed),
    }
}
