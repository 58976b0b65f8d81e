//! Job history types
//!
//! The scheduling service keeps finished runs in a history partitioned into
//! successful and failed runs. The monitor only ever reads it, to settle the
//! fate of a run that dropped out of the live status view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal outcome recorded in the history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryOutcome {
    Succeeded,
    Failed,
}

/// A finished run retained by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub run_id: String,
    pub outcome: HistoryOutcome,
    pub created_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// Snapshot of a job's finished runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHistory {
    pub success_count: u64,
    pub failure_count: u64,
    pub successful_runs: Vec<HistoryRecord>,
    pub failed_runs: Vec<HistoryRecord>,
}

impl JobHistory {
    /// Looks up a run in the history
    ///
    /// The successful set is searched before the failed set. The result only
    /// depends on the snapshot, so repeated lookups always agree.
    pub fn find_run(&self, run_id: &str) -> Option<&HistoryRecord> {
        self.successful_runs
            .iter()
            .chain(self.failed_runs.iter())
            .find(|record| record.run_id == run_id)
    }

    /// Outcome of a run, if the history knows it
    pub fn outcome_of(&self, run_id: &str) -> Option<HistoryOutcome> {
        self.find_run(run_id).map(|record| record.outcome)
    }
}
