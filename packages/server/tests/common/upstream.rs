//! In-process stand-in for the five job board APIs.
//!
//! Serves canned responses on an ephemeral localhost port and records every
//! request path so tests can assert on request counts.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use super::fixtures;

#[derive(Clone, Default)]
struct UpstreamState {
    requests: Arc<Mutex<Vec<String>>>,
}

impl UpstreamState {
    fn record(&self, path: String) {
        self.requests.lock().unwrap().push(path);
    }
}

/// Running mock upstream. Aborted on drop.
pub struct MockUpstream {
    pub base_url: String,
    state: UpstreamState,
    handle: JoinHandle<()>,
}

impl MockUpstream {
    pub async fn start() -> Self {
        let state = UpstreamState::default();
        let app = Router::new()
            .route("/api/non-user-graphql", post(ashby))
            .route("/:company/careers/list", get(bamboohr))
            .route("/v0/postings/:company", get(lever))
            .route("/api/v3/accounts/:company/jobs", post(workable))
            .route("/embed/job_board", get(greenhouse))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock upstream");
        let addr = listener.local_addr().expect("mock upstream address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock upstream");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    /// Recorded requests whose path starts with `prefix`.
    pub fn requests_to(&self, prefix: &str) -> usize {
        self.state
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.starts_with(prefix))
            .count()
    }

    pub fn total_requests(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A base URL nothing listens on; requests fail at the transport layer.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{}", addr)
}

async fn ashby(State(state): State<UpstreamState>, Json(body): Json<Value>) -> Json<Value> {
    let company = body["variables"]["organizationHostedJobsPageName"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    state.record(format!("/api/non-user-graphql/{}", company));

    match company.as_str() {
        "acme" => Json(fixtures::ashby_board()),
        _ => Json(json!({"data": {"jobBoard": null}})),
    }
}

async fn bamboohr(State(state): State<UpstreamState>, Path(company): Path<String>) -> Response {
    state.record(format!("/{}/careers/list", company));

    match company.as_str() {
        "acme" => Json(fixtures::bamboohr_list()).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn lever(State(state): State<UpstreamState>, Path(company): Path<String>) -> Response {
    state.record(format!("/v0/postings/{}", company));

    match company.as_str() {
        "acme" => Json(fixtures::lever_postings()).into_response(),
        "broken" => (StatusCode::BAD_GATEWAY, "upstream exploded").into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({"ok": false}))).into_response(),
    }
}

#[derive(Deserialize)]
struct WorkablePageRequest {
    #[serde(default)]
    token: String,
}

async fn workable(
    State(state): State<UpstreamState>,
    Path(company): Path<String>,
    Json(request): Json<WorkablePageRequest>,
) -> Response {
    state.record(format!("/api/v3/accounts/{}/jobs", company));

    match (company.as_str(), request.token.as_str()) {
        ("acme", "") => Json(fixtures::workable_page(1..=5, "page-2")).into_response(),
        ("acme", "page-2") => Json(fixtures::workable_page(6..=8, "")).into_response(),
        ("looping", _) => Json(fixtures::workable_page(1..=1, "same-token")).into_response(),
        ("empty", _) => Json(json!({"total": 0, "results": [], "nextPage": null})).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

#[derive(Deserialize)]
struct GreenhouseQuery {
    #[serde(rename = "for")]
    company: String,
}

async fn greenhouse(
    State(state): State<UpstreamState>,
    Query(query): Query<GreenhouseQuery>,
) -> Response {
    state.record(format!("/embed/job_board/{}", query.company));

    match query.company.as_str() {
        "acme" => Html(fixtures::GREENHOUSE_BOARD).into_response(),
        _ => Html("<html><body><p>No openings</p></body></html>").into_response(),
    }
}
