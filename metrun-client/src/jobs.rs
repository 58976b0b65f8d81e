//! Job-related API endpoints

use metrun_core::domain::job::JobDefinition;
use metrun_core::domain::run::{RunHandle, RunStatus};
use metrun_core::dto::job::JobSummary;
use metrun_core::dto::run::RunBody;
use reqwest::header::AUTHORIZATION;
use tracing::debug;

use crate::MetronomeClient;
use crate::error::{ClientError, Result};

impl MetronomeClient {
    // =============================================================================
    // Job Definitions
    // =============================================================================

    /// List all job definitions
    ///
    /// # Returns
    /// The jobs registered on the service
    pub async fn list_jobs(&self) -> Result<Vec<JobDefinition>> {
        let url = self.endpoint("jobs");
        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, &self.auth)
            .send()
            .await?;

        let jobs: Vec<JobSummary> = self.handle_response(response).await?;
        Ok(jobs.into_iter().map(JobDefinition::from).collect())
    }

    // =============================================================================
    // Job Launch
    // =============================================================================

    /// Start a new run of a job
    ///
    /// # Arguments
    /// * `job_name` - The job definition ID
    ///
    /// # Returns
    /// Handle of the run the service just created
    ///
    /// # Example
    /// ```no_run
    /// # use metrun_client::MetronomeClient;
    /// # async fn example() -> metrun_client::Result<()> {
    /// let client = MetronomeClient::new("https://dcos.example.com", "secret")?;
    /// let run = client.start_job("nightly-etl").await?;
    /// println!("started run {}", run.run_id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn start_job(&self, job_name: &str) -> Result<RunHandle> {
        if job_name.is_empty() {
            return Err(ClientError::InvalidRequest("job name is empty".to_string()));
        }

        let url = self.endpoint(&format!("jobs/{}/runs", job_name));
        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, &self.auth)
            .send()
            .await?;

        let run: RunBody = self.handle_response(response).await?;
        if run.id.is_empty() {
            return Err(ClientError::Decode(
                "launch response carries no run id".to_string(),
            ));
        }

        let status = RunStatus::from(run);
        debug!(
            job = job_name,
            run_id = %status.run_id,
            status = %status.remote_status,
            "Run created"
        );

        Ok(RunHandle::new(job_name, status.run_id))
    }
}
