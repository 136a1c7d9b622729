//! Shared HTTP plumbing for board adapters.
//!
//! All adapters share one `reqwest::Client` built here. The helpers map
//! transport, status and decode failures onto the common error kinds so
//! every adapter reports them the same way.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::common::{Error, Result};

const USER_AGENT: &str = "Mozilla/5.0 (compatible; jobsync/0.1)";

/// Build the process-wide client used by every board adapter.
pub fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| Error::internal("Failed to create HTTP client", e))
}

/// Send a request and return the response body.
///
/// - transport failure => `Unavailable`
/// - HTTP 404 => `NotFound` (provider does not know the company)
/// - any other non-success status => `Unavailable`
pub(crate) async fn fetch_body(
    board: &str,
    company: &str,
    request: reqwest::RequestBuilder,
) -> Result<String> {
    let response = request.send().await.map_err(|e| {
        warn!(board, company, error = %e, "Board request failed");
        Error::unavailable(format!("Failed to fetch jobs from {}", board), e)
    })?;

    let status = response.status();
    debug!(board, company, status = %status, "Board responded");

    if status == StatusCode::NOT_FOUND {
        return Err(not_found(board, company));
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::unavailable(
            format!("{} returned HTTP {}", board, status.as_u16()),
            truncate(&body, 200),
        ));
    }

    response
        .text()
        .await
        .map_err(|e| Error::unavailable(format!("Failed to read {} response", board), e))
}

/// Decode a JSON body; malformed payloads are `Internal`.
pub(crate) fn decode<T: DeserializeOwned>(board: &str, body: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|e| Error::internal(format!("Failed to parse {} response", board), e))
}

pub(crate) fn not_found(board: &str, company: &str) -> Error {
    Error::not_found(format!("Company {} not found on {}", company, board))
}

fn truncate(body: &str, max: usize) -> String {
    match body.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
