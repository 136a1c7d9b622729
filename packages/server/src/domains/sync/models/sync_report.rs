//! SyncReport model - per-source outcome of one sync run
//!
//! Reports are built in memory and returned to the caller (scheduler log,
//! HTTP response, CLI output). Nothing here is persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::common::{Error, ErrorKind, JobSource};

#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Cancellation or the batch deadline fired before every source finished
    pub cancelled: bool,
    pub sources: Vec<SourceReport>,
}

impl SyncReport {
    pub fn created(&self) -> usize {
        self.sources.iter().map(|s| s.created).sum()
    }

    pub fn existing(&self) -> usize {
        self.sources.iter().map(|s| s.existing).sum()
    }

    pub fn failed_sources(&self) -> usize {
        self.sources
            .iter()
            .filter(|s| s.status == SourceStatus::Failed)
            .count()
    }

    pub fn job_failures(&self) -> usize {
        self.sources.iter().map(|s| s.job_failures.len()).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    /// Every fetched job was checked and written if new
    Synced,
    /// Fetched, but some jobs failed or were not started
    Partial,
    /// Board unknown or the fetch failed
    Failed,
    /// Never started because the run was cancelled
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub company: String,
    pub platform: String,
    pub status: SourceStatus,
    pub fetched: usize,
    pub created: usize,
    pub existing: usize,
    /// Postings sharing a job id with an earlier posting in the same fetch
    pub duplicates: usize,
    /// Jobs never attempted because the run was cancelled mid-source
    pub not_started: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FailureDetail>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub job_failures: Vec<JobFailure>,
}

impl SourceReport {
    pub(crate) fn new(source: &JobSource, status: SourceStatus) -> Self {
        Self {
            company: source.company.clone(),
            platform: source.platform.clone(),
            status,
            fetched: 0,
            created: 0,
            existing: 0,
            duplicates: 0,
            not_started: 0,
            error: None,
            job_failures: Vec::new(),
        }
    }

    pub(crate) fn failed(source: &JobSource, error: &Error) -> Self {
        Self {
            error: Some(FailureDetail::from(error)),
            ..Self::new(source, SourceStatus::Failed)
        }
    }

    pub(crate) fn skipped(source: &JobSource) -> Self {
        Self::new(source, SourceStatus::Skipped)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureDetail {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&Error> for FailureDetail {
    fn from(error: &Error) -> Self {
        Self {
            kind: error.kind(),
            message: error.detail(),
        }
    }
}

/// Which sink call a job failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStage {
    Derive,
    Exists,
    Create,
    Task,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobFailure {
    pub job_id: String,
    pub link: String,
    pub stage: JobStage,
    pub kind: ErrorKind,
    pub message: String,
}
