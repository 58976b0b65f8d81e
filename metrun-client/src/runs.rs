//! Run status and history endpoints

use metrun_core::domain::history::JobHistory;
use metrun_core::domain::run::RunStatus;
use metrun_core::dto::job::JobWithHistory;
use metrun_core::dto::run::RunBody;
use reqwest::header::AUTHORIZATION;

use crate::MetronomeClient;
use crate::error::{ClientError, Result};

impl MetronomeClient {
    /// Get the live status of a run
    ///
    /// The service only tracks active runs here. A run that already finished
    /// may be answered with a 404, see [`ClientError::is_not_found`].
    pub async fn get_run_status(&self, job_name: &str, run_id: &str) -> Result<RunStatus> {
        let url = self.endpoint(&format!("jobs/{}/runs/{}", job_name, run_id));
        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, &self.auth)
            .send()
            .await?;

        let run: RunBody = self.handle_response(response).await?;
        Ok(run.into())
    }

    /// Get the finished-run history of a job
    ///
    /// Returns [`ClientError::MissingHistory`] when the job carries no history.
    pub async fn get_job_history(&self, job_name: &str) -> Result<JobHistory> {
        let url = self.endpoint(&format!("jobs/{}", job_name));
        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, &self.auth)
            .query(&[("embed", "history")])
            .send()
            .await?;

        let job: JobWithHistory = self.handle_response(response).await?;
        job.history
            .map(JobHistory::from)
            .ok_or_else(|| ClientError::MissingHistory(job.id))
    }
}
