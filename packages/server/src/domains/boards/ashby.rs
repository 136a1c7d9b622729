//! Ashby adapter (GraphQL).
//!
//! Ashby exposes the hosted job board through its non-user GraphQL endpoint.
//! Postings carry no URL, so links are built from the company slug and the
//! posting id.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{company_slug, http, BoardAdapter};
use crate::common::lenient::{null_as_empty, string_or_number};
use crate::common::{Job, Result};

const BOARD: &str = "ashby";
const DEFAULT_BASE_URL: &str = "https://jobs.ashbyhq.com";
const GRAPHQL_PATH: &str = "/api/non-user-graphql?op=ApiBoardWithTeams";
const LINK_BASE: &str = "https://jobs.ashbyhq.com";
const OPERATION_NAME: &str = "ApiBoardWithTeams";

const QUERY: &str = r#"
			query ApiBoardWithTeams($organizationHostedJobsPageName: String!) {
				jobBoard: jobBoardWithTeams(
					organizationHostedJobsPageName: $organizationHostedJobsPageName
				) {
					jobPostings {
						id
						title
						locationName
						employmentType
						secondaryLocations {
							locationName
						}
					}
				}
			}
		"#;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlRequest<'a> {
    operation_name: &'static str,
    variables: Variables<'a>,
    query: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Variables<'a> {
    organization_hosted_jobs_page_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct AshbyResponse {
    #[serde(default)]
    data: Option<AshbyData>,
}

#[derive(Debug, Deserialize)]
struct AshbyData {
    #[serde(default, rename = "jobBoard")]
    job_board: Option<JobBoard>,
}

#[derive(Debug, Deserialize)]
struct JobBoard {
    #[serde(default, rename = "jobPostings")]
    job_postings: Option<Vec<Posting>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Posting {
    #[serde(default, deserialize_with = "string_or_number")]
    id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    location_name: String,
    #[serde(default)]
    secondary_locations: Option<Vec<SecondaryLocation>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SecondaryLocation {
    #[serde(default, deserialize_with = "null_as_empty")]
    location_name: String,
}

pub struct Ashby {
    client: reqwest::Client,
    base_url: String,
}

impl Ashby {
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
impl BoardAdapter for Ashby {
    fn board(&self) -> &'static str {
        BOARD
    }

    async fn fetch(&self, company: &str) -> Result<Vec<Job>> {
        let company = company_slug(company)?;
        let url = format!("{}{}", self.base_url, GRAPHQL_PATH);
        let body = GraphQlRequest {
            operation_name: OPERATION_NAME,
            variables: Variables {
                organization_hosted_jobs_page_name: company,
            },
            query: QUERY,
        };

        let response = http::fetch_body(BOARD, company, self.client.post(&url).json(&body)).await?;
        let jobs = parse_postings(company, &response)?;

        info!(board = BOARD, company, count = jobs.len(), "Fetched jobs");
        Ok(jobs)
    }
}

fn parse_postings(company: &str, body: &str) -> Result<Vec<Job>> {
    let response: AshbyResponse = http::decode(BOARD, body)?;

    let postings = response
        .data
        .and_then(|d| d.job_board)
        .and_then(|b| b.job_postings)
        .unwrap_or_default();

    if postings.is_empty() {
        return Err(http::not_found(BOARD, company));
    }

    Ok(postings
        .into_iter()
        .map(|posting| {
            let location = std::iter::once(posting.location_name)
                .chain(
                    posting
                        .secondary_locations
                        .unwrap_or_default()
                        .into_iter()
                        .map(|s| s.location_name),
                )
                .filter(|name| !name.is_empty())
                .collect::<Vec<_>>()
                .join(", ");

            Job {
                title: posting.title,
                location,
                link: format!("{}/{}/{}", LINK_BASE, company, posting.id),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorKind;

    #[test]
    fn test_request_body_shape() {
        let body = GraphQlRequest {
            operation_name: OPERATION_NAME,
            variables: Variables {
                organization_hosted_jobs_page_name: "acme",
            },
            query: QUERY,
        };
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["operationName"], "ApiBoardWithTeams");
        assert_eq!(value["variables"]["organizationHostedJobsPageName"], "acme");
        assert!(value["query"].as_str().unwrap().contains("jobBoardWithTeams"));
    }

    #[test]
    fn test_parse_joins_secondary_locations() {
        let body = r#"{
            "data": {"jobBoard": {"jobPostings": [
                {
                    "id": "4b1f",
                    "title": "Backend Engineer",
                    "locationName": "New York",
                    "employmentType": "FullTime",
                    "secondaryLocations": [
                        {"locationName": "Remote - US"},
                        {"locationName": "Toronto"}
                    ]
                },
                {"id": "77aa", "title": "Designer", "locationName": "London", "secondaryLocations": null}
            ]}}
        }"#;

        let jobs = parse_postings("acme", body).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "Backend Engineer");
        assert_eq!(jobs[0].location, "New York, Remote - US, Toronto");
        assert_eq!(jobs[0].link, "https://jobs.ashbyhq.com/acme/4b1f");
        assert_eq!(jobs[1].location, "London");
    }

    #[test]
    fn test_unknown_company_is_not_found() {
        let body = r#"{"data": {"jobBoard": null}}"#;
        assert_eq!(
            parse_postings("nobody", body).unwrap_err().kind(),
            ErrorKind::NotFound
        );

        let body = r#"{"data": {"jobBoard": {"jobPostings": []}}}"#;
        assert_eq!(
            parse_postings("nobody", body).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_garbage_is_internal() {
        assert_eq!(
            parse_postings("acme", "not json").unwrap_err().kind(),
            ErrorKind::Internal
        );
    }
}
