//! Sync domain - pushes newly discovered postings into the tracking store
//!
//! # Components
//!
//! - `sources` - job sources file (destination database + company/board pairs)
//! - `actions/` - the sync engine and the run entry point
//! - `models/` - per-run report

pub mod actions;
pub mod models;
pub mod sources;

pub use actions::{run_sync, sync_job_source, sync_job_sources, SyncOptions};
pub use models::{FailureDetail, JobFailure, JobStage, SourceReport, SourceStatus, SyncReport};
pub use sources::{load_sources, parse_sources, SyncConfig};
