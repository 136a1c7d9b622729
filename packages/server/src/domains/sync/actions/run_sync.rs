//! Run sync action - the entry point used by the scheduler, the HTTP
//! trigger and the CLI.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::sync_jobs::sync_job_sources;
use crate::common::{Error, Result};
use crate::domains::sync::models::SyncReport;
use crate::domains::sync::sources::load_sources;
use crate::kernel::ServerDeps;

/// Load the job sources file and sync every source.
///
/// Fails only before any network activity: a malformed sources file
/// (`Configuration`) or another run still in progress (`Unavailable`).
pub async fn run_sync(deps: &ServerDeps, cancel: &CancellationToken) -> Result<SyncReport> {
    let _guard = deps.sync_guard.try_lock().map_err(|_| {
        warn!("Sync requested while another run is in progress");
        Error::Unavailable {
            message: "a sync run is already in progress".to_string(),
            source: None,
        }
    })?;
    let _running = RunningFlag::raise(&deps.sync_running);

    let config = load_sources(&deps.sources_path).await?;
    info!(
        path = %deps.sources_path.display(),
        sources = config.sources.len(),
        "Loaded job sources"
    );

    let sink = deps.sinks.sink(&config.database_id);
    Ok(sync_job_sources(&config.sources, &deps.boards, sink, &deps.sync_options, cancel).await)
}

/// Keeps `ServerDeps::sync_running` set until the run returns.
struct RunningFlag<'a>(&'a AtomicBool);

impl<'a> RunningFlag<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for RunningFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
