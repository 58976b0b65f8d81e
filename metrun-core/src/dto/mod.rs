//! Data Transfer Objects for the Metronome API
//!
//! These mirror the JSON bodies the scheduling service sends back. They are
//! converted into domain types at the client boundary so the monitor never
//! sees wire shapes.

pub mod job;
pub mod run;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Parses a service timestamp such as `2016-07-29T21:03:40.162+0000`
///
/// RFC 3339 is accepted as well. Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}
