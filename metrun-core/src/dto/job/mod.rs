//! Job DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::history::{HistoryOutcome, HistoryRecord, JobHistory};
use crate::domain::job::JobDefinition;

/// Entry of the job listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<JobSummary> for JobDefinition {
    fn from(summary: JobSummary) -> Self {
        Self {
            id: summary.id,
            description: summary.description,
        }
    }
}

/// Job fetched with `embed=history`
///
/// `history` is absent when the service has no history object for the job.
#[derive(Debug, Clone, Deserialize)]
pub struct JobWithHistory {
    pub id: String,
    #[serde(default)]
    pub history: Option<HistoryBody>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryBody {
    #[serde(default)]
    pub success_count: u64,
    #[serde(default)]
    pub failure_count: u64,
    #[serde(default)]
    pub successful_finished_runs: Vec<FinishedRun>,
    #[serde(default)]
    pub failed_finished_runs: Vec<FinishedRun>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishedRun {
    pub id: String,
    #[serde(default, deserialize_with = "super::lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::lenient_timestamp")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl FinishedRun {
    fn into_record(self, outcome: HistoryOutcome) -> HistoryRecord {
        HistoryRecord {
            run_id: self.id,
            outcome,
            created_at: self.created_at,
            finished_at: self.finished_at,
        }
    }
}

impl From<HistoryBody> for JobHistory {
    fn from(body: HistoryBody) -> Self {
        Self {
            success_count: body.success_count,
            failure_count: body.failure_count,
            successful_runs: body
                .successful_finished_runs
                .into_iter()
                .map(|run| run.into_record(HistoryOutcome::Succeeded))
                .collect(),
            failed_runs: body
                .failed_finished_runs
                .into_iter()
                .map(|run| run.into_record(HistoryOutcome::Failed))
                .collect(),
        }
    }
}
