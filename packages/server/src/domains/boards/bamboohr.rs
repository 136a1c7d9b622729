//! BambooHR adapter (REST, single response).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::{company_slug, http, join_location, BoardAdapter};
use crate::common::lenient::{null_as_empty, string_or_number};
use crate::common::{Job, Result};

const BOARD: &str = "bamboohr";

#[derive(Debug, Deserialize)]
struct BambooHrResponse {
    #[serde(default)]
    result: Option<Vec<Opening>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Opening {
    #[serde(default, deserialize_with = "string_or_number")]
    id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    job_opening_name: String,
    #[serde(default)]
    location: Option<Location>,
}

#[derive(Debug, Default, Deserialize)]
struct Location {
    #[serde(default, deserialize_with = "null_as_empty")]
    city: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    state: String,
    #[serde(default, alias = "addressCountry", deserialize_with = "null_as_empty")]
    country: String,
}

/// BambooHR serves each company from its own subdomain:
/// `https://<company>.bamboohr.com/careers/list`.
pub struct BambooHr {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl BambooHr {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: None,
        }
    }

    /// Serve every company from `<base_url>/<company>/careers/list` instead
    /// of the per-company subdomain.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    fn list_url(&self, company: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{}/{}/careers/list", base, company),
            None => format!("https://{}.bamboohr.com/careers/list", company),
        }
    }
}

#[async_trait]
impl BoardAdapter for BambooHr {
    fn board(&self) -> &'static str {
        BOARD
    }

    async fn fetch(&self, company: &str) -> Result<Vec<Job>> {
        let company = company_slug(company)?;
        let url = self.list_url(company);

        let body = http::fetch_body(BOARD, company, self.client.get(&url)).await?;
        let jobs = parse_openings(company, &body)?;

        info!(board = BOARD, company, count = jobs.len(), "Fetched jobs");
        Ok(jobs)
    }
}

fn parse_openings(company: &str, body: &str) -> Result<Vec<Job>> {
    let response: BambooHrResponse = http::decode(BOARD, body)?;
    let openings = response.result.unwrap_or_default();

    if openings.is_empty() {
        return Err(http::not_found(BOARD, company));
    }

    Ok(openings
        .into_iter()
        .map(|opening| {
            let location = opening.location.unwrap_or_default();
            Job {
                title: opening.job_opening_name,
                location: join_location(&location.city, &location.state, &location.country),
                link: format!("https://{}.bamboohr.com/careers/{}", company, opening.id),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorKind;

    #[test]
    fn test_parse_openings() {
        let body = r#"{
            "meta": {"totalCount": 2},
            "result": [
                {"id": "17", "jobOpeningName": "Support Lead", "location": {"city": "Austin", "state": "Texas"}},
                {"id": 18, "jobOpeningName": "Accountant", "location": {"city": "Lyon", "state": null, "addressCountry": "France"}}
            ]
        }"#;

        let jobs = parse_openings("acme", body).unwrap();
        assert_eq!(
            jobs,
            vec![
                Job::new("Support Lead", "Austin, Texas", "https://acme.bamboohr.com/careers/17"),
                Job::new("Accountant", "Lyon, France", "https://acme.bamboohr.com/careers/18"),
            ]
        );
    }

    #[test]
    fn test_missing_location_is_empty() {
        let body = r#"{"result": [{"id": "3", "jobOpeningName": "Intern"}]}"#;
        let jobs = parse_openings("acme", body).unwrap();
        assert_eq!(jobs[0].location, "");
    }

    #[test]
    fn test_empty_result_is_not_found() {
        let err = parse_openings("acme", r#"{"result": []}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_list_url() {
        let client = reqwest::Client::new();
        assert_eq!(
            BambooHr::new(client.clone()).list_url("acme"),
            "https://acme.bamboohr.com/careers/list"
        );
        assert_eq!(
            BambooHr::new(client)
                .with_base_url("http://127.0.0.1:9000/")
                .list_url("acme"),
            "http://127.0.0.1:9000/acme/careers/list"
        );
    }
}
