// TestDependencies - mock implementations for testing
//
// Provides an in-memory job sink and a scripted board adapter that can be
// wired into ServerDeps or passed straight to the sync engine.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{BaseJobSink, BaseSinkProvider};
use crate::common::{Error, ErrorKind, Job, JobId, JobSource, Result};
use crate::domains::boards::BoardAdapter;

// =============================================================================
// Mock Job Sink
// =============================================================================

/// A record written through `MockJobSink::create`.
#[derive(Debug, Clone)]
pub struct CreatedRecord {
    pub job_id: JobId,
    pub job: Job,
    pub company: String,
    pub platform: String,
}

#[derive(Default)]
struct SinkState {
    existing: HashSet<String>,
    created: Vec<CreatedRecord>,
    fail_exists: HashSet<String>,
    fail_create: HashSet<String>,
    exists_calls: Vec<String>,
    database_ids: Vec<String>,
}

/// In-memory sink. Clones share state, so a test can keep a handle while
/// the engine owns another.
#[derive(Clone, Default)]
pub struct MockJobSink {
    state: Arc<Mutex<SinkState>>,
    delay: Option<Duration>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockJobSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a job id as already present in the store.
    pub fn with_existing(self, job_id: &str) -> Self {
        self.state.lock().unwrap().existing.insert(job_id.to_string());
        self
    }

    /// Make `exists` fail with `Unavailable` for this job id.
    pub fn failing_exists(self, job_id: &str) -> Self {
        self.state.lock().unwrap().fail_exists.insert(job_id.to_string());
        self
    }

    /// Make `create` fail with `Internal` for this job id.
    pub fn failing_create(self, job_id: &str) -> Self {
        self.state.lock().unwrap().fail_create.insert(job_id.to_string());
        self
    }

    /// Sleep inside every call, to observe concurrency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn created(&self) -> Vec<CreatedRecord> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn created_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .created()
            .into_iter()
            .map(|r| r.job_id.to_string())
            .collect();
        ids.sort();
        ids
    }

    pub fn exists_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().exists_calls.clone()
    }

    /// Database ids handed to the provider, in order.
    pub fn database_ids(&self) -> Vec<String> {
        self.state.lock().unwrap().database_ids.clone()
    }

    /// Highest number of sink calls observed running at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl BaseJobSink for MockJobSink {
    async fn exists(&self, job_id: &JobId) -> Result<bool> {
        self.enter().await;
        let result = {
            let mut state = self.state.lock().unwrap();
            state.exists_calls.push(job_id.to_string());
            if state.fail_exists.contains(job_id.as_str()) {
                Err(Error::unavailable(
                    format!("Failed to check if job {} exists", job_id),
                    "mock sink unavailable",
                ))
            } else {
                Ok(state.existing.contains(job_id.as_str()))
            }
        };
        self.leave();
        result
    }

    async fn create(&self, job: &Job, job_id: &JobId, source: &JobSource) -> Result<()> {
        self.enter().await;
        let result = {
            let mut state = self.state.lock().unwrap();
            if state.fail_create.contains(job_id.as_str()) {
                Err(Error::internal(
                    format!("Failed to create page for job {}", job.title),
                    "mock validation error",
                ))
            } else {
                state.existing.insert(job_id.to_string());
                state.created.push(CreatedRecord {
                    job_id: job_id.clone(),
                    job: job.clone(),
                    company: source.company.clone(),
                    platform: source.platform.clone(),
                });
                Ok(())
            }
        };
        self.leave();
        result
    }
}

impl BaseSinkProvider for MockJobSink {
    fn sink(&self, database_id: &str) -> Arc<dyn BaseJobSink> {
        self.state
            .lock()
            .unwrap()
            .database_ids
            .push(database_id.to_string());
        Arc::new(self.clone())
    }
}

// =============================================================================
// Mock Board
// =============================================================================

#[derive(Clone)]
enum Scripted {
    Jobs(Vec<Job>),
    Fail(ErrorKind),
}

/// Board adapter returning scripted results per company.
///
/// Companies with no script fail with `NotFound`, like a real board.
#[derive(Clone)]
pub struct MockBoard {
    board: &'static str,
    scripts: HashMap<String, Scripted>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockBoard {
    pub fn new(board: &'static str) -> Self {
        Self {
            board,
            scripts: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_jobs(mut self, company: &str, jobs: Vec<Job>) -> Self {
        self.scripts.insert(company.to_string(), Scripted::Jobs(jobs));
        self
    }

    pub fn failing(mut self, company: &str, kind: ErrorKind) -> Self {
        self.scripts.insert(company.to_string(), Scripted::Fail(kind));
        self
    }

    /// Companies fetched so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BoardAdapter for MockBoard {
    fn board(&self) -> &'static str {
        self.board
    }

    async fn fetch(&self, company: &str) -> Result<Vec<Job>> {
        self.calls.lock().unwrap().push(company.to_string());

        match self.scripts.get(company) {
            Some(Scripted::Jobs(jobs)) if !jobs.is_empty() => Ok(jobs.clone()),
            Some(Scripted::Fail(kind)) => Err(scripted_error(*kind, self.board, company)),
            _ => Err(Error::not_found(format!(
                "Company {} not found on {}",
                company, self.board
            ))),
        }
    }
}

fn scripted_error(kind: ErrorKind, board: &str, company: &str) -> Error {
    let message = format!("scripted {} failure for {} on {}", kind, company, board);
    match kind {
        ErrorKind::NotFound => Error::not_found(message),
        ErrorKind::Unavailable => Error::unavailable(message, "connection refused"),
        ErrorKind::Internal => Error::internal_msg(message),
        ErrorKind::InvalidArgument => Error::invalid_argument(message),
        ErrorKind::Configuration => Error::configuration(message),
    }
}

/// Jobs with links `https://<board>.example/<company>/<n>` for n in 1..=count.
pub fn sample_jobs(board: &str, company: &str, count: usize) -> Vec<Job> {
    (1..=count)
        .map(|n| {
            Job::new(
                format!("{} role {}", company, n),
                "Remote",
                format!("https://{}.example/{}/{}-{}", board, company, company, n),
            )
        })
        .collect()
}
