//! Failures of a Metronome API call
//!
//! Each variant says how far a request got: it never reached the service
//! (`Transport`), the service refused it (`Status`), or its answer did not
//! have the expected shape (`Decode`, `MissingHistory`).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, TLS or request timeout failure
    #[error("request to Metronome failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx answer; `body` is the raw response text
    #[error("Metronome answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected Metronome response: {0}")]
    Decode(String),

    /// Rejected before anything was sent
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The job answered without a `history` object
    #[error("no history recorded for job {0}")]
    MissingHistory(String),
}

impl ClientError {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// True when the service does not know the job or run, which for a run
    /// usually means it already left the live view
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}
