//! Notion-backed job sink.
//!
//! Each job becomes one page in the configured database with the properties
//! `Name`, `Location`, `Link`, `Job ID`, `Company name` and `Job platform`.
//! Existence is checked with an exact-match filter on `Job ID`.

use async_trait::async_trait;
use notion_client::{
    DatabaseQueryRequest, NotionClient, NotionError, PageCreateRequest, PropertyFilter,
    PropertyValue,
};
use std::sync::Arc;
use tracing::{debug, warn};

use super::{BaseJobSink, BaseSinkProvider};
use crate::common::{Error, Job, JobId, JobSource, Result};

pub const PROP_NAME: &str = "Name";
pub const PROP_LOCATION: &str = "Location";
pub const PROP_LINK: &str = "Link";
pub const PROP_JOB_ID: &str = "Job ID";
pub const PROP_COMPANY: &str = "Company name";
pub const PROP_PLATFORM: &str = "Job platform";

pub struct NotionJobSink {
    client: NotionClient,
    database_id: String,
}

impl NotionJobSink {
    pub fn new(client: NotionClient, database_id: impl Into<String>) -> Self {
        Self {
            client,
            database_id: database_id.into(),
        }
    }
}

#[async_trait]
impl BaseJobSink for NotionJobSink {
    async fn exists(&self, job_id: &JobId) -> Result<bool> {
        let request = DatabaseQueryRequest {
            filter: Some(PropertyFilter::rich_text_equals(PROP_JOB_ID, job_id.as_str())),
            page_size: Some(1),
            start_cursor: None,
        };

        let response = self
            .client
            .query_database(&self.database_id, &request)
            .await
            .map_err(|e| map_notion_error("check if job exists", job_id, e))?;

        let exists = !response.results.is_empty();
        debug!(job_id = %job_id, exists, "Checked Notion for job");
        Ok(exists)
    }

    async fn create(&self, job: &Job, job_id: &JobId, source: &JobSource) -> Result<()> {
        let request = page_request(&self.database_id, job, job_id, source);

        self.client
            .create_page(&request)
            .await
            .map_err(|e| map_notion_error("create page", job_id, e))?;

        debug!(job_id = %job_id, title = %job.title, "Created Notion page");
        Ok(())
    }
}

fn page_request(
    database_id: &str,
    job: &Job,
    job_id: &JobId,
    source: &JobSource,
) -> PageCreateRequest {
    PageCreateRequest::in_database(database_id)
        .with_property(PROP_NAME, PropertyValue::title(&job.title))
        .with_property(PROP_LOCATION, PropertyValue::rich_text(&job.location))
        .with_property(PROP_LINK, PropertyValue::url(&job.link))
        .with_property(PROP_JOB_ID, PropertyValue::rich_text(job_id.as_str()))
        .with_property(PROP_COMPANY, PropertyValue::rich_text(&source.company))
        .with_property(PROP_PLATFORM, PropertyValue::rich_text(&source.platform))
}

/// Transport, rate limit and 5xx failures are `Unavailable`; everything
/// else Notion rejects is `Internal`.
fn map_notion_error(operation: &str, job_id: &JobId, err: NotionError) -> Error {
    warn!(job_id = %job_id, error = %err, "Notion failed to {}", operation);
    let message = format!("Failed to {} for job {}", operation, job_id);
    if err.is_transient() {
        Error::unavailable(message, err)
    } else {
        Error::internal(message, err)
    }
}

/// Builds a [`NotionJobSink`] per database, sharing one client.
pub struct NotionSinkProvider {
    client: NotionClient,
}

impl NotionSinkProvider {
    pub fn new(client: NotionClient) -> Self {
        Self { client }
    }
}

impl BaseSinkProvider for NotionSinkProvider {
    fn sink(&self, database_id: &str) -> Arc<dyn BaseJobSink> {
        Arc::new(NotionJobSink::new(self.client.clone(), database_id))
    }
}
