//! Job sources file.
//!
//! ```text
//! notion_database_id,<database id>
//! company,platform
//! acme,greenhouse
//! globex , lever
//! ```
//!
//! Line 1 names the destination database, line 2 is a header and is
//! skipped, every following non-blank line is a `<company>,<platform>` pair.
//! Any malformed line fails the whole load.

use std::path::Path;

use crate::common::{Error, JobSource, Result};

const DATABASE_KEY: &str = "notion_database_id";

/// Parsed contents of the job sources file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub database_id: String,
    pub sources: Vec<JobSource>,
}

pub async fn load_sources(path: &Path) -> Result<SyncConfig> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        Error::configuration(format!("failed to read {}: {}", path.display(), e))
    })?;
    parse_sources(&contents)
}

pub fn parse_sources(contents: &str) -> Result<SyncConfig> {
    let mut lines = contents.lines();

    let database_id = lines
        .next()
        .and_then(parse_database_line)
        .ok_or_else(|| {
            Error::configuration(format!(
                "invalid config format: expected '{},<id>' in first line",
                DATABASE_KEY
            ))
        })?;

    // Header
    lines.next();

    let mut sources = Vec::new();
    for (idx, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 3;
        let source = parse_source_line(line).ok_or_else(|| {
            Error::configuration(format!(
                "invalid config format on line {}: expected 'company,platform'",
                line_no
            ))
        })?;
        sources.push(source);
    }

    Ok(SyncConfig {
        database_id,
        sources,
    })
}

fn parse_database_line(line: &str) -> Option<String> {
    let (key, id) = split_pair(line)?;
    (key == DATABASE_KEY).then(|| id.to_string())
}

fn parse_source_line(line: &str) -> Option<JobSource> {
    let (company, platform) = split_pair(line)?;
    Some(JobSource::new(company, platform))
}

/// Exactly two comma-separated, non-empty, trimmed fields.
fn split_pair(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split(',');
    let first = parts.next()?.trim();
    let second = parts.next()?.trim();
    if parts.next().is_some() || first.is_empty() || second.is_empty() {
        return None;
    }
    Some((first, second))
}
