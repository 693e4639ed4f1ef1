//! Candidate evidence aggregation and recommendation pipeline.
//!
//! Public profile signals from GitHub and LinkedIn are merged with a job
//! description, evaluated by a language model, and the resulting reports are
//! filed into recommendation buckets backed by a processed-candidate ledger.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
