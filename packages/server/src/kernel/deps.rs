//! Server dependencies (using traits for testability)
//!
//! This module provides the central dependency container used by the sync
//! actions, the scheduler and the HTTP routes. The job sink sits behind a
//! trait so tests can swap in `MockJobSink`.

use notion_client::NotionClient;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::common::Result;
use crate::config::Config;
use crate::domains::boards::{http, BoardRegistry};
use crate::domains::sync::SyncOptions;
use crate::kernel::{BaseSinkProvider, NotionSinkProvider};

/// Dependencies shared by every entry point.
#[derive(Clone)]
pub struct ServerDeps {
    pub boards: Arc<BoardRegistry>,
    pub sinks: Arc<dyn BaseSinkProvider>,
    /// Path of the job sources file, re-read on every sync run
    pub sources_path: PathBuf,
    pub sync_options: SyncOptions,
    /// Held for the duration of a sync run so scheduled and manual runs never overlap
    pub sync_guard: Arc<Mutex<()>>,
    /// Set while a run holds `sync_guard`; read by health checks without locking
    pub sync_running: Arc<AtomicBool>,
}

impl ServerDeps {
    pub fn new(
        boards: Arc<BoardRegistry>,
        sinks: Arc<dyn BaseSinkProvider>,
        sources_path: impl Into<PathBuf>,
        sync_options: SyncOptions,
    ) -> Self {
        Self {
            boards,
            sinks,
            sources_path: sources_path.into(),
            sync_options,
            sync_guard: Arc::new(Mutex::new(())),
            sync_running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_sync_running(&self) -> bool {
        self.sync_running.load(Ordering::SeqCst)
    }

    /// Production wiring: real board adapters and the Notion sink.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = http::build_client()?;
        let boards = BoardRegistry::with_defaults(client.clone());

        let mut notion = NotionClient::new(config.notion_token.clone()).with_client(client);
        if let Some(url) = &config.notion_api_url {
            notion = notion.with_base_url(url);
        }

        Ok(Self::new(
            Arc::new(boards),
            Arc::new(NotionSinkProvider::new(notion)),
            config.sources_path.clone(),
            config.sync_options(),
        ))
    }
}
