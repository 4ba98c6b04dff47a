//! Download module for media retrieval.
//!
//! This module provides:
//! - Asset fetching over the shared HTTP transport
//! - Per-post orchestration of media, thumbnail and sidecar jobs
//! - The timeline and single-post pipelines
//! - Job outcomes and run statistics

pub mod media;
pub mod orchestrator;
pub mod pipeline;
pub mod state;

pub use media::Fetcher;
pub use orchestrator::Orchestrator;
pub use pipeline::{run_single, run_timeline};
pub use state::{JobKind, JobOutcome, JobRecord, PostReport, RunStats};
