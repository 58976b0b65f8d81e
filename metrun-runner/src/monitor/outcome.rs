//! Terminal outcome of a monitoring session

use metrun_core::domain::run::RunHandle;
use std::fmt;
use std::process::ExitCode;
use std::time::Duration;

/// Reason reported when neither the live view nor the history knows the run
pub const RUN_NOT_IN_HISTORY: &str = "run not found in history";

/// Final verdict of one monitoring session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The run completed successfully
    Succeeded { run: RunHandle },
    /// The run reached a failed state
    Failed { run: RunHandle, reason: String },
    /// The deadline elapsed before the run reached a terminal state
    TimedOut { run: RunHandle, after: Duration },
    /// The run's fate could not be determined
    ///
    /// `run` is `None` when the launch itself was rejected.
    Errored {
        run: Option<RunHandle>,
        reason: String,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// The run this outcome refers to, if one was ever started
    pub fn run(&self) -> Option<&RunHandle> {
        match self {
            Self::Succeeded { run } | Self::Failed { run, .. } | Self::TimedOut { run, .. } => {
                Some(run)
            }
            Self::Errored { run, .. } => run.as_ref(),
        }
    }

    /// Process exit status: 0 for success, 1 for every other outcome
    pub fn exit_status(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded { run } => write!(f, "run {} succeeded", run),
            Self::Failed { run, reason } => write!(f, "run {} failed: {}", run, reason),
            Self::TimedOut { run, after } => {
                write!(f, "run {} timed out after {}s", run, after.as_secs())
            }
            Self::Errored {
                run: Some(run),
                reason,
            } => write!(f, "run {} errored: {}", run, reason),
            Self::Errored { run: None, reason } => write!(f, "{}", reason),
        }
    }
}
