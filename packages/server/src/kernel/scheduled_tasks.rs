//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! One periodic task: run the job sync on the configured cron schedule.
//!
//! ```text
//! Scheduler (SYNC_SCHEDULE, hourly by default)
//!     │
//!     └─► run_sync()
//!             └─► For each job source → fetch → dedup → create
//! ```

use anyhow::Result;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;

use crate::domains::sync::run_sync;
use crate::kernel::ServerDeps;

/// Start all scheduled tasks
pub async fn start_scheduler(
    deps: Arc<ServerDeps>,
    schedule: &str,
    shutdown: CancellationToken,
) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let sync_job = Job::new_async(schedule, move |_uuid, _lock| {
        let deps = deps.clone();
        let shutdown = shutdown.clone();
        Box::pin(async move {
            run_scheduled_sync(&deps, &shutdown).await;
        })
    })?;

    scheduler.add(sync_job).await?;
    scheduler.start().await?;

    tracing::info!(schedule, "Scheduled tasks started (job sync)");
    Ok(scheduler)
}

/// Run one scheduled sync and log the outcome.
async fn run_scheduled_sync(deps: &ServerDeps, shutdown: &CancellationToken) {
    if shutdown.is_cancelled() {
        return;
    }

    tracing::info!("Running scheduled job sync");

    match run_sync(deps, &shutdown.child_token()).await {
        Ok(report) => tracing::info!(
            run_id = %report.run_id,
            sources = report.sources.len(),
            created = report.created(),
            failed_sources = report.failed_sources(),
            job_failures = report.job_failures(),
            "Scheduled job sync complete"
        ),
        Err(e) => tracing::error!(kind = %e.kind(), "Scheduled job sync failed: {}", e.detail()),
    }
}
