//! Run domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One execution instance of a job definition
///
/// Obtained exactly once, when the launch request succeeds, and reused for
/// every status query of that run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunHandle {
    pub run_id: String,
    pub job_name: String,
}

impl RunHandle {
    pub fn new(job_name: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            job_name: job_name.into(),
        }
    }
}

impl fmt::Display for RunHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.job_name, self.run_id)
    }
}

/// Point-in-time snapshot of a run, produced fresh on every poll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatus {
    pub run_id: String,
    pub state: RunState,
    /// Status string exactly as reported by the service
    pub remote_status: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Run execution state as seen by the monitor
///
/// `Unknown` means the live record could not be retrieved, not that the run
/// itself is in an unknown condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Running,
    Completed,
    Failed,
    Unknown,
}

impl RunState {
    /// Maps a Metronome status string onto a run state
    ///
    /// A live record without a status is `Unknown`. Anything else that is not
    /// a recognised terminal status counts as running.
    pub fn from_remote(status: &str) -> Self {
        match status.trim().to_ascii_uppercase().as_str() {
            "" => Self::Unknown,
            "SUCCESS" | "COMPLETED" => Self::Completed,
            "FAILED" => Self::Failed,
            _ => Self::Running,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
