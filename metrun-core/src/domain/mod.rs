//! Core domain types
//!
//! These types are the monitor's local view of entities owned by the remote
//! scheduling service. They are fetched on demand and never written back.

pub mod history;
pub mod job;
pub mod run;
