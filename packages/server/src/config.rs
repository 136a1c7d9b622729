use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::common::{Error, Result};
use crate::domains::sync::SyncOptions;

/// Hourly, on the hour (tokio-cron-scheduler takes a seconds field).
const DEFAULT_SCHEDULE: &str = "0 0 * * * *";
const DEFAULT_CONCURRENCY: usize = 5;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub notion_token: String,
    pub notion_api_url: Option<String>,
    pub port: u16,
    pub sources_path: PathBuf,
    pub sync_concurrency: usize,
    pub sync_schedule: String,
    pub sync_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so parsing can be tested without
    /// touching the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let notion_token = var("NOTION_TOKEN")
            .ok_or_else(|| Error::configuration("NOTION_TOKEN must be set"))?;

        let port = match var("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| Error::configuration("PORT must be a valid number"))?,
            None => 8080,
        };

        let sync_concurrency = match var("SYNC_CONCURRENCY") {
            Some(n) => n
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    Error::configuration("SYNC_CONCURRENCY must be a positive number")
                })?,
            None => DEFAULT_CONCURRENCY,
        };

        let sync_timeout = match var("SYNC_TIMEOUT_SECS") {
            Some(secs) => Some(Duration::from_secs(secs.trim().parse().map_err(|_| {
                Error::configuration("SYNC_TIMEOUT_SECS must be a number of seconds")
            })?)),
            None => None,
        };

        Ok(Self {
            notion_token,
            notion_api_url: var("NOTION_API_URL"),
            port,
            sources_path: var("JOB_SOURCES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("config.txt")),
            sync_concurrency,
            sync_schedule: var("SYNC_SCHEDULE").unwrap_or_else(|| DEFAULT_SCHEDULE.to_string()),
            sync_timeout,
        })
    }

    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            concurrency: self.sync_concurrency,
            timeout: self.sync_timeout,
        }
    }
}
