//! Metrun HTTP Client
//!
//! A small, typed client for the Metronome job scheduling API as exposed
//! through a DC/OS cluster.
//!
//! The [`SchedulerClient`] trait is what the run monitor consumes;
//! [`MetronomeClient`] implements it over HTTP.
//!
//! # Example
//!
//! ```no_run
//! use metrun_client::{MetronomeClient, SchedulerClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MetronomeClient::new("https://dcos.example.com", "secret")?;
//!
//!     let run = client.start_job("nightly-etl").await?;
//!     let status = client.get_run_status(&run.job_name, &run.run_id).await?;
//!
//!     println!("{} is {}", run, status.state);
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;
mod runs;
pub mod scheduler;

#[cfg(test)]
mod test_server;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use scheduler::SchedulerClient;

use async_trait::async_trait;
use metrun_core::domain::history::JobHistory;
use metrun_core::domain::job::JobDefinition;
use metrun_core::domain::run::{RunHandle, RunStatus};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

/// Path of the Metronome service below the cluster URL
const SERVICE_PATH: &str = "service/metronome";

/// Per-request timeout applied by [`MetronomeClient::new`]
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for the Metronome API
///
/// Every request carries the cluster access token. The token is kept out of
/// the `Debug` output.
#[derive(Clone)]
pub struct MetronomeClient {
    /// Metronome base URL (e.g., "https://dcos.example.com/service/metronome")
    base_url: String,
    /// Value of the `Authorization` header
    auth: String,
    /// HTTP client instance
    client: Client,
}

impl MetronomeClient {
    /// Create a new client for the cluster at `cluster_url`
    ///
    /// # Arguments
    /// * `cluster_url` - Base URL of the DC/OS cluster (e.g., "https://dcos.example.com")
    /// * `token` - DC/OS access token
    ///
    /// # Example
    /// ```
    /// use metrun_client::MetronomeClient;
    ///
    /// let client = MetronomeClient::new("https://dcos.example.com", "secret").unwrap();
    /// assert_eq!(client.base_url(), "https://dcos.example.com/service/metronome");
    /// ```
    pub fn new(cluster_url: impl AsRef<str>, token: impl AsRef<str>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(cluster_url, token, client))
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(cluster_url: impl AsRef<str>, token: impl AsRef<str>, client: Client) -> Self {
        let cluster_url = cluster_url.as_ref().trim_end_matches('/');
        Self {
            base_url: format!("{}/{}", cluster_url, SERVICE_PATH),
            auth: format!("token={}", token.as_ref()),
            client,
        }
    }

    /// Get the Metronome base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::status(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

impl fmt::Debug for MetronomeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetronomeClient")
            .field("base_url", &self.base_url)
            .field("auth", &"token=<redacted>")
            .finish()
    }
}

#[async_trait]
impl SchedulerClient for MetronomeClient {
    async fn list_jobs(&self) -> Result<Vec<JobDefinition>> {
        MetronomeClient::list_jobs(self).await
    }

    async fn start_job(&self, job_name: &str) -> Result<RunHandle> {
        MetronomeClient::start_job(self, job_name).await
    }

    async fn get_run_status(&self, job_name: &str, run_id: &str) -> Result<RunStatus> {
        MetronomeClient::get_run_status(self, job_name, run_id).await
    }

    async fn get_job_history(&self, job_name: &str) -> Result<JobHistory> {
        MetronomeClient::get_job_history(self, job_name).await
    }
}
