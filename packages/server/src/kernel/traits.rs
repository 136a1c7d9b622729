// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// The sync engine in domains/sync depends on these, never on a concrete store.
//
// Naming convention: Base* for trait names (e.g., BaseJobSink)

use async_trait::async_trait;
use std::sync::Arc;

use crate::common::{Job, JobId, JobSource, Result};

// =============================================================================
// Job Sink Trait (Infrastructure - external tracking store)
// =============================================================================

/// Destination for deduplicated job records.
///
/// Neither operation retries internally; transport failures surface as
/// `Unavailable` and rejected writes as `Internal`.
#[async_trait]
pub trait BaseJobSink: Send + Sync {
    /// Whether a record with this job id already exists.
    async fn exists(&self, job_id: &JobId) -> Result<bool>;

    /// Insert a record for `job` found on `source`.
    async fn create(&self, job: &Job, job_id: &JobId, source: &JobSource) -> Result<()>;
}

/// Hands out a sink bound to one destination database.
///
/// The database id lives in the job sources file, so the sink can only be
/// built once that file has been read.
pub trait BaseSinkProvider: Send + Sync {
    fn sink(&self, database_id: &str) -> Arc<dyn BaseJobSink>;
}
