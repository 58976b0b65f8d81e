//! Run DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::run::{RunState, RunStatus};

/// Run object returned when a run is started or looked up
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunBody {
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "super::lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<RunBody> for RunStatus {
    fn from(body: RunBody) -> Self {
        Self {
            state: RunState::from_remote(&body.status),
            run_id: body.id,
            remote_status: body.status,
            created_at: body.created_at,
        }
    }
}
