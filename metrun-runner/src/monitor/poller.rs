//! Run poller
//!
//! Drives a single monitoring session: launch, then a timed polling loop
//! multiplexing the deadline, the poll tick and the heartbeat tick.

use metrun_client::SchedulerClient;
use metrun_core::domain::history::HistoryOutcome;
use metrun_core::domain::run::{RunHandle, RunState};
use std::sync::Arc;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::outcome::{Outcome, RUN_NOT_IN_HISTORY};

/// Timing policy of a monitoring session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSettings {
    /// Deadline for the polling loop, measured from the moment polling starts
    pub timeout: Duration,
    /// How often the run status is queried
    pub poll_interval: Duration,
    /// How often a progress event is emitted while waiting
    pub heartbeat_interval: Duration,
}

impl MonitorSettings {
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
    pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(60);

    /// Settings with the given timeout and default intervals
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            heartbeat_interval: Self::DEFAULT_HEARTBEAT_INTERVAL,
        }
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self::new(Duration::from_secs(30 * 60))
    }
}

/// Far enough ahead that no session reaches it
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// `start + delay` with the delay capped at [`FAR_FUTURE`], so oversized
/// settings cannot overflow the clock
fn instant_after(start: Instant, delay: Duration) -> Instant {
    start + delay.min(FAR_FUTURE)
}

/// Which timer fired
enum Wakeup {
    Deadline,
    Poll,
    Heartbeat,
}

/// Launches a job run and waits for its verdict
pub struct RunMonitor<C> {
    client: Arc<C>,
    settings: MonitorSettings,
}

impl<C: SchedulerClient> RunMonitor<C> {
    pub fn new(client: Arc<C>, settings: MonitorSettings) -> Self {
        Self { client, settings }
    }

    /// Runs one full monitoring session for `job_name`
    ///
    /// Always resolves to exactly one terminal outcome. Launch is attempted
    /// once; nothing is polled if it fails.
    pub async fn run(&self, job_name: &str) -> Outcome {
        self.log_available_jobs().await;

        info!(job = job_name, "Attempting to start job");

        let run = match self.client.start_job(job_name).await {
            Ok(run) => run,
            Err(e) => {
                error!(job = job_name, error = %e, "Failed to start job");
                return Outcome::Errored {
                    run: None,
                    reason: format!("failed to start job {}: {}", job_name, e),
                };
            }
        };

        info!(
            job = %run.job_name,
            run_id = %run.run_id,
            timeout_secs = self.settings.timeout.as_secs(),
            "Waiting for job to finish"
        );

        self.poll_until_terminal(run).await
    }

    /// Lists the jobs known to the service, for diagnostics only
    async fn log_available_jobs(&self) {
        match self.client.list_jobs().await {
            Ok(jobs) => {
                for job in jobs {
                    debug!(job = %job.id, "Found job");
                }
            }
            Err(e) => error!(error = %e, "Failed to retrieve available jobs"),
        }
    }

    /// Polls the run until it is terminal or the deadline elapses
    async fn poll_until_terminal(&self, run: RunHandle) -> Outcome {
        let started = Instant::now();
        let deadline = instant_after(started, self.settings.timeout);

        let sleep = time::sleep_until(deadline);
        tokio::pin!(sleep);

        let mut poll = time::interval_at(
            instant_after(started, self.settings.poll_interval),
            self.settings.poll_interval,
        );
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut heartbeat = time::interval_at(
            instant_after(started, self.settings.heartbeat_interval),
            self.settings.heartbeat_interval,
        );
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            // Deadline first: a poll due at the same instant must not extend the session.
            let wakeup = tokio::select! {
                biased;
                _ = &mut sleep => Wakeup::Deadline,
                _ = poll.tick() => Wakeup::Poll,
                _ = heartbeat.tick() => Wakeup::Heartbeat,
            };

            match wakeup {
                Wakeup::Deadline => return self.timed_out(run, started.elapsed()),
                Wakeup::Heartbeat => {
                    info!(
                        job = %run.job_name,
                        run_id = %run.run_id,
                        elapsed_secs = started.elapsed().as_secs(),
                        "Still waiting for job to finish"
                    );
                }
                Wakeup::Poll => {
                    // Remote calls in flight when the deadline passes are dropped.
                    match time::timeout_at(deadline, self.check_run(&run)).await {
                        Ok(Some(outcome)) => return outcome,
                        Ok(None) => {}
                        Err(_) => return self.timed_out(run, started.elapsed()),
                    }
                }
            }
        }
    }

    /// Queries the live status once
    ///
    /// Returns `None` while the run is still going.
    async fn check_run(&self, run: &RunHandle) -> Option<Outcome> {
        let status = match self
            .client
            .get_run_status(&run.job_name, &run.run_id)
            .await
        {
            Ok(status) => status,
            Err(e) => {
                warn!(
                    job = %run.job_name,
                    run_id = %run.run_id,
                    error = %e,
                    not_found = e.is_not_found(),
                    "Failed to get job status, checking job history"
                );
                return Some(self.reconcile(run).await);
            }
        };

        match status.state {
            RunState::Completed => {
                info!(
                    job = %run.job_name,
                    run_id = %run.run_id,
                    status = %status.remote_status,
                    "Job has completed successfully"
                );
                Some(Outcome::Succeeded { run: run.clone() })
            }
            RunState::Failed => {
                error!(
                    job = %run.job_name,
                    run_id = %run.run_id,
                    status = %status.remote_status,
                    "Job has failed"
                );
                Some(Outcome::Failed {
                    run: run.clone(),
                    reason: format!("job reported status {}", status.remote_status),
                })
            }
            RunState::Running => {
                debug!(
                    job = %run.job_name,
                    run_id = %run.run_id,
                    status = %status.remote_status,
                    "Job still running"
                );
                None
            }
            RunState::Unknown => {
                warn!(
                    job = %run.job_name,
                    run_id = %run.run_id,
                    status = %status.remote_status,
                    "Live record unavailable, checking job history"
                );
                Some(self.reconcile(run).await)
            }
        }
    }

    /// Settles the run's fate from the job history
    ///
    /// Entered once, on the first failed status query. Every branch is terminal.
    async fn reconcile(&self, run: &RunHandle) -> Outcome {
        let history = match self.client.get_job_history(&run.job_name).await {
            Ok(history) => history,
            Err(e) => {
                error!(job = %run.job_name, error = %e, "Failed to get job history");
                return Outcome::Errored {
                    run: Some(run.clone()),
                    reason: format!("failed to get job history: {}", e),
                };
            }
        };

        if history.successful_runs.is_empty() {
            warn!(job = %run.job_name, "Job history has no successful runs");
        }

        match history.outcome_of(&run.run_id) {
            Some(HistoryOutcome::Succeeded) => {
                info!(
                    job = %run.job_name,
                    run_id = %run.run_id,
                    "Job history records the run as successful"
                );
                Outcome::Succeeded { run: run.clone() }
            }
            Some(HistoryOutcome::Failed) => {
                error!(
                    job = %run.job_name,
                    run_id = %run.run_id,
                    "Job history records the run as failed"
                );
                Outcome::Failed {
                    run: run.clone(),
                    reason: "run recorded as failed in job history".to_string(),
                }
            }
            None => {
                error!(
                    job = %run.job_name,
                    run_id = %run.run_id,
                    successful = history.successful_runs.len(),
                    failed = history.failed_runs.len(),
                    "Run not found in job history"
                );
                Outcome::Errored {
                    run: Some(run.clone()),
                    reason: RUN_NOT_IN_HISTORY.to_string(),
                }
            }
        }
    }

    fn timed_out(&self, run: RunHandle, after: Duration) -> Outcome {
        error!(
            job = %run.job_name,
            run_id = %run.run_id,
            timeout_secs = self.settings.timeout.as_secs(),
            "Timed out waiting for job"
        );
        Outcome::TimedOut { run, after }
    }
}
