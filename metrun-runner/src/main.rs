//! Metrun
//!
//! Starts a Metronome job and blocks until the run finishes, so a CI
//! pipeline step succeeds or fails with the job.
//!
//! Architecture:
//! - Configuration: flags and plugin environment variables
//! - Client: HTTP access to Metronome through the DC/OS cluster URL
//! - Monitor: launch, poll on a fixed cadence, reconcile against job history
//!
//! The process exits with status 0 only when the run succeeded.

mod config;
mod monitor;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Args, Config};
use crate::monitor::{Outcome, RunMonitor};
use metrun_client::MetronomeClient;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let config = Config::from_args(Args::parse());

    // Initialize logging
    let default_filter = if config.debug {
        "metrun=debug,metrun_client=debug"
    } else {
        "metrun=info,metrun_client=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(e);
    }

    info!(url = %config.url, job = %config.job, "Starting Metronome job runner");

    let client = MetronomeClient::new(&config.url, &config.token)
        .context("Failed to create Metronome client")?;

    let monitor = RunMonitor::new(Arc::new(client), config.monitor_settings());
    let outcome = monitor.run(&config.job).await;

    if let Some(run) = outcome.run() {
        info!(
            job = %run.job_name,
            run_id = %run.run_id,
            success = outcome.is_success(),
            "Monitoring session finished"
        );
    }
    report(&outcome);

    Ok(outcome.exit_code())
}

/// Prints the final verdict
fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Succeeded { .. } => println!("{} {}", "✓".green(), outcome),
        Outcome::TimedOut { .. } => eprintln!("{} {}", "⏱".yellow(), outcome.to_string().yellow()),
        Outcome::Failed { .. } | Outcome::Errored { .. } => {
            eprintln!("{} {}", "✗".red(), outcome.to_string().red())
        }
    }
}
