//! Metrun Core
//!
//! Core types shared by the Metronome client and the run monitor.
//!
//! This crate contains:
//! - Domain types: jobs, runs, run status and job history
//! - DTOs: the JSON shapes exchanged with the Metronome API

pub mod domain;
pub mod dto;
