//! Lever adapter (REST, single response).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::{company_slug, http, BoardAdapter};
use crate::common::lenient::null_as_empty;
use crate::common::{Job, Result};

const BOARD: &str = "lever";
const DEFAULT_BASE_URL: &str = "https://api.lever.co";
const LINK_BASE: &str = "https://jobs.lever.co";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Posting {
    #[serde(default, deserialize_with = "null_as_empty")]
    id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    text: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    hosted_url: String,
    #[serde(default)]
    categories: Option<Categories>,
}

#[derive(Debug, Default, Deserialize)]
struct Categories {
    #[serde(default, deserialize_with = "null_as_empty")]
    location: String,
}

pub struct Lever {
    client: reqwest::Client,
    base_url: String,
}

impl Lever {
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
}

#[async_trait]
impl BoardAdapter for Lever {
    fn board(&self) -> &'static str {
        BOARD
    }

    async fn fetch(&self, company: &str) -> Result<Vec<Job>> {
        let company = company_slug(company)?;
        let url = format!("{}/v0/postings/{}", self.base_url, company);

        let body = http::fetch_body(BOARD, company, self.client.get(&url)).await?;
        let jobs = parse_postings(company, &body)?;

        info!(board = BOARD, company, count = jobs.len(), "Fetched jobs");
        Ok(jobs)
    }
}

fn parse_postings(company: &str, body: &str) -> Result<Vec<Job>> {
    let postings: Vec<Posting> = http::decode(BOARD, body)?;

    if postings.is_empty() {
        return Err(http::not_found(BOARD, company));
    }

    Ok(postings
        .into_iter()
        .map(|posting| {
            // hostedUrl is always present in practice; fall back to the
            // public board URL built from the posting id.
            let link = if posting.hosted_url.is_empty() {
                format!("{}/{}/{}", LINK_BASE, company, posting.id)
            } else {
                posting.hosted_url
            };

            Job {
                title: posting.text,
                location: posting.categories.unwrap_or_default().location,
                link,
            }
        })
        .collect())
}
