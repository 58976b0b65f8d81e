//! Runner configuration
//!
//! Command-line flags and their environment variables, the way a CI plugin
//! step receives them, plus validation of the resolved values.

use anyhow::bail;
use clap::Parser;
use std::time::Duration;

use crate::monitor::MonitorSettings;

/// Command-line arguments
///
/// Flags take precedence over `PLUGIN_*` variables, which take precedence
/// over the cluster-wide `DCOS_*` fallbacks.
#[derive(Debug, Parser)]
#[command(name = "metrun")]
#[command(version, about = "Start a Metronome job and wait for it to finish", long_about = None)]
pub struct Args {
    /// DC/OS cluster URL
    #[arg(long, env = "PLUGIN_URL")]
    pub url: Option<String>,

    /// DC/OS access token
    #[arg(long, env = "PLUGIN_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Metronome job to start
    #[arg(long, env = "PLUGIN_JOB")]
    pub job: Option<String>,

    /// Job timeout in minutes
    #[arg(long, env = "PLUGIN_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// Enable debug logging
    #[arg(long, env = "PLUGIN_DEBUG")]
    pub debug: bool,

    /// Seconds between two status queries
    #[arg(long, env = "PLUGIN_POLL_INTERVAL", default_value_t = 10)]
    pub poll_interval: u64,

    /// Seconds between two progress messages
    #[arg(long, env = "PLUGIN_HEARTBEAT_INTERVAL", default_value_t = 60)]
    pub heartbeat_interval: u64,
}

/// Resolved runner configuration
#[derive(Clone)]
pub struct Config {
    /// DC/OS cluster base URL (e.g., "https://dcos.example.com")
    pub url: String,

    /// Access token attached to every request
    pub token: String,

    /// Job definition to launch
    pub job: String,

    /// Deadline for the polling loop
    pub timeout: Duration,

    /// How often to query the run status
    pub poll_interval: Duration,

    /// How often to report progress while waiting
    pub heartbeat_interval: Duration,

    /// Raise log verbosity
    pub debug: bool,
}

impl Config {
    /// Resolves arguments, falling back to `DCOS_URL` and `DCOS_ACS_TOKEN`
    pub fn from_args(args: Args) -> Self {
        Self::resolve(args, |name| std::env::var(name).ok())
    }

    fn resolve(args: Args, env: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            url: args.url.or_else(|| env("DCOS_URL")).unwrap_or_default(),
            token: args
                .token
                .or_else(|| env("DCOS_ACS_TOKEN"))
                .unwrap_or_default(),
            job: args.job.unwrap_or_default(),
            timeout: Duration::from_secs(args.timeout.saturating_mul(60)),
            poll_interval: Duration::from_secs(args.poll_interval),
            heartbeat_interval: Duration::from_secs(args.heartbeat_interval),
            debug: args.debug,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.url.is_empty() {
            bail!("url cannot be empty (set --url, PLUGIN_URL or DCOS_URL)");
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            bail!("url must start with http:// or https://");
        }

        if self.token.is_empty() {
            bail!("token cannot be empty (set --token, PLUGIN_TOKEN or DCOS_ACS_TOKEN)");
        }

        if self.job.is_empty() {
            bail!("job cannot be empty (set --job or PLUGIN_JOB)");
        }

        if self.timeout.is_zero() {
            bail!("timeout must be greater than 0");
        }

        if self.poll_interval.is_zero() {
            bail!("poll_interval must be greater than 0");
        }

        if self.heartbeat_interval.is_zero() {
            bail!("heartbeat_interval must be greater than 0");
        }

        Ok(())
    }

    pub fn monitor_settings(&self) -> MonitorSettings {
        MonitorSettings {
            timeout: self.timeout,
            poll_interval: self.poll_interval,
            heartbeat_interval: self.heartbeat_interval,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .field("job", &self.job)
            .field("timeout", &self.timeout)
            .field("poll_interval", &self.poll_interval)
            .field("heartbeat_interval", &self.heartbeat_interval)
            .field("debug", &self.debug)
            .finish()
    }
}
