//! Sync jobs action
//!
//! Fetch postings for each job source and write the ones the sink has not
//! seen yet. Sources run one after another; jobs within a source run on a
//! bounded pool. A failing source or job is recorded in the report and the
//! run moves on.
//!
//! ```text
//! for source in sources (sequential)
//!     └─► registry.resolve(platform) → adapter.fetch(company)
//!             └─► for job (≤ concurrency at once)
//!                     └─► sink.exists(job_id)? skip : sink.create(job)
//! ```

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::common::{Error, ErrorKind, Job, JobSource};
use crate::domains::boards::BoardRegistry;
use crate::domains::sync::models::{
    JobFailure, JobStage, SourceReport, SourceStatus, SyncReport,
};
use crate::kernel::BaseJobSink;

/// Tuning for one sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Maximum sink operations in flight for one source
    pub concurrency: usize,
    /// Deadline for the whole run; unstarted work is skipped once it passes
    pub timeout: Option<Duration>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            concurrency: 5,
            timeout: None,
        }
    }
}

enum JobOutcome {
    Created,
    Existing,
    Failed(JobFailure),
}

/// Sync every source in order and report per-source outcomes.
///
/// Never fails as a whole: unknown boards, fetch errors and sink errors are
/// recorded in the returned report. When `cancel` fires (or the configured
/// timeout passes) no new work starts, in-flight sink calls are awaited,
/// and the remaining sources are reported as skipped.
pub async fn sync_job_sources(
    sources: &[JobSource],
    boards: &BoardRegistry,
    sink: Arc<dyn BaseJobSink>,
    options: &SyncOptions,
    cancel: &CancellationToken,
) -> SyncReport {
    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    let cancel = cancel.child_token();

    let deadline = options.timeout.map(|timeout| {
        let token = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            warn!(timeout_secs = timeout.as_secs(), "Sync deadline reached, cancelling");
            token.cancel();
        })
    });

    info!(run_id = %run_id, sources = sources.len(), concurrency = options.concurrency, "Starting job sync");

    let mut reports = Vec::with_capacity(sources.len());
    for source in sources {
        if cancel.is_cancelled() {
            reports.push(SourceReport::skipped(source));
            continue;
        }
        reports.push(sync_job_source(source, boards, &sink, options.concurrency, &cancel).await);
    }

    if let Some(handle) = deadline {
        handle.abort();
    }

    let report = SyncReport {
        run_id,
        started_at,
        finished_at: Utc::now(),
        cancelled: cancel.is_cancelled(),
        sources: reports,
    };

    info!(
        run_id = %run_id,
        created = report.created(),
        existing = report.existing(),
        failed_sources = report.failed_sources(),
        job_failures = report.job_failures(),
        cancelled = report.cancelled,
        "Job sync finished"
    );

    report
}

/// Sync a single source.
pub async fn sync_job_source(
    source: &JobSource,
    boards: &BoardRegistry,
    sink: &Arc<dyn BaseJobSink>,
    concurrency: usize,
    cancel: &CancellationToken,
) -> SourceReport {
    let Some(adapter) = boards.resolve(&source.platform) else {
        let err = Error::invalid_argument(format!("{} board not found", source.platform));
        warn!(company = %source.company, platform = %source.platform, "Skipping source with unknown board");
        return SourceReport::failed(source, &err);
    };

    let fetched = tokio::select! {
        biased;
        _ = cancel.cancelled() => return SourceReport::skipped(source),
        result = adapter.fetch(&source.company) => result,
    };

    let jobs = match fetched {
        Ok(jobs) => jobs,
        Err(err) => {
            warn!(
                company = %source.company,
                platform = %source.platform,
                kind = %err.kind(),
                error = %err.detail(),
                "Error processing job source"
            );
            return SourceReport::failed(source, &err);
        }
    };

    let mut report = SourceReport::new(source, SourceStatus::Synced);
    report.fetched = jobs.len();

    let (jobs, duplicates) = dedup_by_job_id(jobs);
    report.duplicates = duplicates;
    let total = jobs.len();

    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for (idx, job) in jobs.into_iter().enumerate() {
        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            permit = semaphore.clone().acquire_owned() => permit.ok(),
        };
        let Some(permit) = permit else {
            report.not_started = total - idx;
            break;
        };

        let sink = sink.clone();
        let source = source.clone();
        tasks.spawn(async move {
            let _permit = permit;
            sync_job(sink.as_ref(), &job, &source).await
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(JobOutcome::Created) => report.created += 1,
            Ok(JobOutcome::Existing) => report.existing += 1,
            Ok(JobOutcome::Failed(failure)) => report.job_failures.push(failure),
            Err(e) => report.job_failures.push(JobFailure {
                job_id: String::new(),
                link: String::new(),
                stage: JobStage::Task,
                kind: ErrorKind::Internal,
                message: format!("job task failed: {}", e),
            }),
        }
    }

    if !report.job_failures.is_empty() || report.not_started > 0 {
        report.status = SourceStatus::Partial;
    }

    info!(
        company = %source.company,
        platform = %source.platform,
        fetched = report.fetched,
        created = report.created,
        existing = report.existing,
        duplicates = report.duplicates,
        failed = report.job_failures.len(),
        not_started = report.not_started,
        "Job source synced"
    );

    report
}

/// Check the sink for one job and create it if absent.
async fn sync_job(sink: &dyn BaseJobSink, job: &Job, source: &JobSource) -> JobOutcome {
    let job_id = job.job_id();
    if job_id.is_empty() {
        return JobOutcome::Failed(JobFailure {
            job_id: String::new(),
            link: job.link.clone(),
            stage: JobStage::Derive,
            kind: ErrorKind::Internal,
            message: "link has no path segment to derive a job id from".to_string(),
        });
    }

    let failure = |stage: JobStage, err: Error| {
        warn!(job_id = %job_id, stage = ?stage, error = %err.detail(), "Job sync failed");
        JobOutcome::Failed(JobFailure {
            job_id: job_id.to_string(),
            link: job.link.clone(),
            stage,
            kind: err.kind(),
            message: err.detail(),
        })
    };

    match sink.exists(&job_id).await {
        Ok(true) => {
            debug!(job_id = %job_id, "Job already exists, skipping");
            return JobOutcome::Existing;
        }
        Ok(false) => {}
        Err(err) => return failure(JobStage::Exists, err),
    }

    match sink.create(job, &job_id, source).await {
        Ok(()) => {
            debug!(job_id = %job_id, title = %job.title, "Created job record");
            JobOutcome::Created
        }
        Err(err) => failure(JobStage::Create, err),
    }
}

/// Keep the first posting per job id. Two postings with the same id would
/// otherwise race past the existence check and both be created. Postings
/// without an id are all kept so each one is reported as a derive failure.
fn dedup_by_job_id(jobs: Vec<Job>) -> (Vec<Job>, usize) {
    let before = jobs.len();
    let mut seen = HashSet::new();
    let unique: Vec<Job> = jobs
        .into_iter()
        .filter(|job| {
            let id = job.job_id();
            id.is_empty() || seen.insert(id)
        })
        .collect();
    let duplicates = before - unique.len();
    (unique, duplicates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{sample_jobs, MockBoard, MockJobSink};

    fn registry(boards: Vec<MockBoard>) -> BoardRegistry {
        boards
            .into_iter()
            .fold(BoardRegistry::empty(), |r, b| r.with_adapter(Arc::new(b)))
    }

    #[test]
    fn test_dedup_by_job_id() {
        let jobs = vec![
            Job::new("A", "", "https://x.example/jobs/1"),
            Job::new("A again", "", "https://x.example/jobs/1?ref=feed"),
            Job::new("B", "", "https://x.example/jobs/2"),
        ];
        let (unique, duplicates) = dedup_by_job_id(jobs);
        assert_eq!(unique.len(), 2);
        assert_eq!(duplicates, 1);
        assert_eq!(unique[0].title, "A");
    }

    #[tokio::test]
    async fn test_creates_new_and_skips_existing() {
        let board = MockBoard::new("lever").with_jobs("acme", sample_jobs("lever", "acme", 3));
        let sink = MockJobSink::new().with_existing("acme-2");
        let sink_dyn: Arc<dyn BaseJobSink> = Arc::new(sink.clone());

        let report = sync_job_source(
            &JobSource::new("acme", "lever"),
            &registry(vec![board]),
            &sink_dyn,
            2,
            &CancellationToken::new(),
        )
        .await;

        assert_eq!(report.status, SourceStatus::Synced);
        assert_eq!(report.fetched, 3);
        assert_eq!(report.created, 2);
        assert_eq!(report.existing, 1);
        assert_eq!(sink.created_ids(), vec!["acme-1", "acme-3"]);
    }

    #[tokio::test]
    async fn test_unknown_board_is_reported_not_raised() {
        let sink: Arc<dyn BaseJobSink> = Arc::new(MockJobSink::new());
        let report = sync_job_source(
            &JobSource::new("acme", "unknown-board"),
            &BoardRegistry::empty(),
            &sink,
            2,
            &CancellationToken::new(),
        )
        .await;

        assert_eq!(report.status, SourceStatus::Failed);
        assert_eq!(report.error.unwrap().kind, ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn test_cancelled_before_start_skips_everything() {
        let board = MockBoard::new("lever").with_jobs("acme", sample_jobs("lever", "acme", 3));
        let sink = MockJobSink::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let report = sync_job_sources(
            &[JobSource::new("acme", "lever"), JobSource::new("globex", "lever")],
            &registry(vec![board.clone()]),
            Arc::new(sink.clone()),
            &SyncOptions::default(),
            &cancel,
        )
        .await;

        assert!(report.cancelled);
        assert!(report
            .sources
            .iter()
            .all(|s| s.status == SourceStatus::Skipped));
        assert!(board.calls().is_empty());
        assert!(sink.created().is_empty());
    }

    #[tokio::test]
    async fn test_job_without_id_is_reported() {
        let board = MockBoard::new("lever").with_jobs(
            "acme",
            vec![
                Job::new("No link", "", ""),
                Job::new("Good", "", "https://x.example/jobs/9"),
            ],
        );
        let sink = MockJobSink::new();
        let sink_dyn: Arc<dyn BaseJobSink> = Arc::new(sink.clone());

        let report = sync_job_source(
            &JobSource::new("acme", "lever"),
            &registry(vec![board]),
            &sink_dyn,
            1,
            &CancellationToken::new(),
        )
        .await;

        assert_eq!(report.status, SourceStatus::Partial);
        assert_eq!(report.created, 1);
        assert_eq!(report.job_failures.len(), 1);
        assert_eq!(report.job_failures[0].stage, JobStage::Derive);
    }

    #[tokio::test]
    async fn test_host_only_links_are_derive_failures_not_duplicates() {
        let board = MockBoard::new("greenhouse").with_jobs(
            "acme",
            vec![
                Job::new("Root", "", "https://boards.greenhouse.io/"),
                Job::new("Root again", "", "https://boards.greenhouse.io/#"),
                Job::new("Real", "", "https://boards.greenhouse.io/acme/jobs/42"),
            ],
        );
        let sink = MockJobSink::new();
        let sink_dyn: Arc<dyn BaseJobSink> = Arc::new(sink.clone());

        let report = sync_job_source(
            &JobSource::new("acme", "greenhouse"),
            &registry(vec![board]),
            &sink_dyn,
            2,
            &CancellationToken::new(),
        )
        .await;

        assert_eq!(report.duplicates, 0);
        assert_eq!(report.created, 1);
        assert_eq!(report.job_failures.len(), 2);
        assert!(report
            .job_failures
            .iter()
            .all(|f| f.stage == JobStage::Derive));
        assert_eq!(sink.created_ids(), vec!["42"]);
        assert!(sink.exists_calls().iter().all(|id| !id.is_empty()));
    }
}
