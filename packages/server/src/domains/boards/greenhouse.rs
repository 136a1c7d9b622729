//! Greenhouse adapter (HTML scrape).
//!
//! Scrapes the embeddable job board. Each posting is a `<div class="opening">`
//! holding an anchor (title + href) and a `<span class="location">`.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};
use url::Url;

use super::{company_slug, http, BoardAdapter};
use crate::common::{Error, Job, Result};

const BOARD: &str = "greenhouse";
const DEFAULT_BASE_URL: &str = "https://boards.greenhouse.io";

/// Host relative hrefs are resolved against.
const LINK_BASE: &str = "https://boards.greenhouse.io";

pub struct Greenhouse {
    client: reqwest::Client,
    base_url: String,
}

impl Greenhouse {
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
impl BoardAdapter for Greenhouse {
    fn board(&self) -> &'static str {
        BOARD
    }

    async fn fetch(&self, company: &str) -> Result<Vec<Job>> {
        let company = company_slug(company)?;
        let url = format!("{}/embed/job_board", self.base_url);
        let request = self.client.get(&url).query(&[("for", company)]);

        let html = http::fetch_body(BOARD, company, request).await?;
        let jobs = parse_openings(&html)?;

        if jobs.is_empty() {
            return Err(http::not_found(BOARD, company));
        }

        info!(board = BOARD, company, count = jobs.len(), "Fetched jobs");
        Ok(jobs)
    }
}

/// Every `div.opening` in document order.
fn openings(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "div" && el.value().classes().any(|c| c == "opening"))
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| Error::internal_msg(format!("Invalid selector {}: {:?}", css, e)))
}

fn parse_openings(html: &str) -> Result<Vec<Job>> {
    let document = Html::parse_document(html);
    let anchor = selector("a[href]")?;
    let location = selector("span.location")?;

    Ok(openings(&document)
        .filter_map(|opening| parse_opening(opening, &anchor, &location))
        .collect())
}

fn parse_opening(opening: ElementRef<'_>, anchor: &Selector, location: &Selector) -> Option<Job> {
    let Some(a) = opening.select(anchor).next() else {
        debug!(board = BOARD, "Skipping opening without a link");
        return None;
    };

    let href = a.value().attr("href").unwrap_or_default().trim();
    if href.is_empty() || href.starts_with('#') {
        debug!(board = BOARD, href, "Skipping opening whose link points at the board itself");
        return None;
    }
    let link = absolute_link(href)?;

    Some(Job {
        title: element_text(a),
        location: opening
            .select(location)
            .next()
            .map(element_text)
            .unwrap_or_default(),
        link,
    })
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Rewrite relative hrefs against the Greenhouse host.
fn absolute_link(href: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }

    let base = Url::parse(LINK_BASE).ok()?;
    match base.join(href) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            debug!(board = BOARD, href, error = %e, "Skipping unresolvable link");
            None
        }
    }
}
