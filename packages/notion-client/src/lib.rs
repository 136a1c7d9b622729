//! Pure Notion REST API client.
//!
//! A minimal client for the Notion public API. Supports querying a database
//! and creating pages inside one, which is all a write-only sync needs.
//!
//! # Example
//!
//! ```rust,ignore
//! use notion_client::{DatabaseQueryRequest, NotionClient, PropertyFilter};
//!
//! let client = NotionClient::new("secret_xxx".into());
//!
//! let request = DatabaseQueryRequest {
//!     filter: Some(PropertyFilter::rich_text_equals("Job ID", "4f2c")),
//!     page_size: Some(1),
//!     ..Default::default()
//! };
//! let found = client.query_database("database-id", &request).await?;
//! println!("{} matches", found.results.len());
//! ```

pub mod error;
pub mod types;

pub use error::{NotionError, Result};
pub use types::{
    DatabaseQueryRequest, DatabaseQueryResponse, FilterCondition, Page, PageCreateRequest,
    Parent, PropertyFilter, PropertyValue, RichText, Text, TextFilterCondition,
};

use serde::de::DeserializeOwned;
use types::ErrorBody;

const BASE_URL: &str = "https://api.notion.com/v1";

/// API version pinned for every request.
const NOTION_VERSION: &str = "2022-06-28";

#[derive(Debug, Clone)]
pub struct NotionClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl NotionClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root (staging, local fakes).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Share an existing HTTP client (connection pool, timeouts).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Query a database. Only the first page of results is returned; pass
    /// `start_cursor` from a previous response to continue.
    pub async fn query_database(
        &self,
        database_id: &str,
        request: &DatabaseQueryRequest,
    ) -> Result<DatabaseQueryResponse> {
        let url = format!("{}/databases/{}/query", self.base_url, database_id);
        tracing::debug!(database_id, "Querying Notion database");

        let builder = self.client.post(&url).json(request);
        self.send(builder).await
    }

    /// Create a page. For database parents the properties must match the
    /// database schema or Notion rejects the request with a validation error.
    pub async fn create_page(&self, request: &PageCreateRequest) -> Result<Page> {
        let url = format!("{}/pages", self.base_url);
        let builder = self.client.post(&url).json(request);
        let page: Page = self.send(builder).await?;
        tracing::debug!(page_id = %page.id, "Created Notion page");
        Ok(page)
    }

    async fn send<T: DeserializeOwned>(&self, builder: reqwest::RequestBuilder) -> Result<T> {
        let resp = builder
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let parsed: Option<ErrorBody> = serde_json::from_str(&body).ok();
            let (code, message) = match parsed {
                Some(err) => (err.code, err.message),
                None => (String::new(), body),
            };
            return Err(NotionError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
