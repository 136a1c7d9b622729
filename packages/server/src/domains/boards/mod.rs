//! Board adapters - one per applicant tracking system.
//!
//! Each adapter speaks one upstream protocol and returns postings in the
//! shared [`Job`] shape:
//!
//! | Board | Protocol |
//! |-------|----------|
//! | `ashby` | GraphQL POST |
//! | `bamboohr` | REST GET, single response |
//! | `lever` | REST GET, single response |
//! | `workable` | REST POST, cursor paginated |
//! | `greenhouse` | HTML scrape of the embeddable board |
//!
//! Adapters are looked up by board id through [`BoardRegistry`].

pub mod ashby;
pub mod bamboohr;
pub mod greenhouse;
pub mod http;
pub mod lever;
pub mod registry;
pub mod workable;

use async_trait::async_trait;

use crate::common::{Error, Job, Result};

pub use ashby::Ashby;
pub use bamboohr::BambooHr;
pub use greenhouse::Greenhouse;
pub use lever::Lever;
pub use registry::BoardRegistry;
pub use workable::Workable;

/// Fetches postings for a company from one provider.
#[async_trait]
pub trait BoardAdapter: Send + Sync {
    /// Registry key, e.g. `"greenhouse"`.
    fn board(&self) -> &'static str;

    /// Fetch every posting the provider lists for `company`.
    ///
    /// Zero postings is reported as `NotFound`, never as an empty list.
    async fn fetch(&self, company: &str) -> Result<Vec<Job>>;
}

/// Trim and validate a company slug before touching the network.
///
/// Slugs are spliced into hostnames (`<company>.bamboohr.com`) and URL
/// paths, so only `[A-Za-z0-9._-]` is accepted and a slug made of dots
/// alone is rejected.
pub(crate) fn company_slug(company: &str) -> Result<&str> {
    let company = company.trim();
    if company.is_empty() {
        return Err(Error::invalid_argument("company must not be empty"));
    }

    let valid_chars = company
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if !valid_chars || company.chars().all(|c| c == '.') {
        return Err(Error::invalid_argument(format!(
            "company {:?} must contain only letters, digits, '.', '_' or '-'",
            company
        )));
    }
    Ok(company)
}

/// `city, region` when a region is known, otherwise `city, country`.
/// Empty parts are dropped.
pub fn join_location(city: &str, region: &str, country: &str) -> String {
    let second = if region.trim().is_empty() {
        country
    } else {
        region
    };

    [city, second]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
