//! Sync domain actions
//!
//! `run_sync` is the full batch (sources file → engine). `sync_job_sources`
//! and `sync_job_source` are the engine itself and take their inputs
//! directly, which is what tests drive.

pub mod run_sync;
pub mod sync_jobs;

pub use run_sync::run_sync;
pub use sync_jobs::{sync_job_source, sync_job_sources, SyncOptions};
