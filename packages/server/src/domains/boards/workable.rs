//! Workable adapter (REST, cursor paginated).
//!
//! Each request POSTs the cursor token (empty on the first call). The loop
//! ends when the response carries no `nextPage` token.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{company_slug, http, join_location, BoardAdapter};
use crate::common::lenient::{null_as_empty, string_or_number};
use crate::common::{Error, Job, Result};

const BOARD: &str = "workable";
const DEFAULT_BASE_URL: &str = "https://apply.workable.com";

#[derive(Debug, Serialize)]
struct PageRequest<'a> {
    token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkablePage {
    #[serde(default)]
    results: Option<Vec<Opening>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    next_page: String,
    #[serde(default)]
    total: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Opening {
    #[serde(default, deserialize_with = "string_or_number")]
    id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    title: String,
    #[serde(default)]
    location: Option<Location>,
}

#[derive(Debug, Default, Deserialize)]
struct Location {
    #[serde(default, deserialize_with = "null_as_empty")]
    city: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    country: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    region: String,
}

pub struct Workable {
    client: reqwest::Client,
    base_url: String,
}

impl Workable {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn fetch_page(&self, url: &str, company: &str, token: &str) -> Result<WorkablePage> {
        let request = self.client.post(url).json(&PageRequest { token });
        let body = http::fetch_body(BOARD, company, request).await?;
        http::decode(BOARD, &body)
    }
}

#[async_trait]
impl BoardAdapter for Workable {
    fn board(&self) -> &'static str {
        BOARD
    }

    async fn fetch(&self, company: &str) -> Result<Vec<Job>> {
        let company = company_slug(company)?;
        let url = format!("{}/api/v3/accounts/{}/jobs", self.base_url, company);

        let mut jobs = Vec::new();
        let mut token = String::new();
        let mut pages = 0usize;

        loop {
            let page = self.fetch_page(&url, company, &token).await?;
            pages += 1;

            let results = page.results.unwrap_or_default();
            debug!(
                board = BOARD,
                company,
                page = pages,
                results = results.len(),
                total = ?page.total,
                "Fetched page"
            );
            jobs.extend(results.into_iter().map(|opening| normalize(company, opening)));

            if page.next_page.is_empty() {
                break;
            }
            if page.next_page == token {
                return Err(Error::internal_msg(format!(
                    "{} returned the same page token twice for {}",
                    BOARD, company
                )));
            }
            token = page.next_page;
        }

        if jobs.is_empty() {
            return Err(http::not_found(BOARD, company));
        }

        info!(board = BOARD, company, pages, count = jobs.len(), "Fetched jobs");
        Ok(jobs)
    }
}

fn normalize(company: &str, opening: Opening) -> Job {
    let location = opening.location.unwrap_or_default();
    Job {
        title: opening.title,
        location: join_location(&location.city, &location.region, &location.country),
        link: format!("https://{}.workable.com/j/{}", company, opening.id),
    }
}
