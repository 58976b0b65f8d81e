//! Run monitor
//!
//! Launches one run of a job definition and follows it until it reaches a
//! terminal state or the session deadline elapses. When the live status of
//! the run can no longer be read, the job history decides its fate.

pub mod outcome;
pub mod poller;

#[cfg(test)]
mod testing;

pub use outcome::Outcome;
pub use poller::{MonitorSettings, RunMonitor};
