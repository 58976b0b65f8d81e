//! Job definition types

use serde::{Deserialize, Serialize};

/// A named job definition registered on the scheduling service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDefinition {
    pub id: String,
    pub description: Option<String>,
}
