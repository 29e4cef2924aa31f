//! Mock control server.
//!
//! Serves the handshake endpoints (`/token`, `/simplecsrf/token.json`),
//! the control endpoints (`/remote/*.json`, `/service/version.json`), and
//! a long-polling status endpoint. Queued status payloads are returned
//! immediately (after an optional artificial delay); with nothing queued
//! the status endpoint sleeps for `returnafter` seconds and answers with
//! a heartbeat, like the real server does on a long-poll timeout.

// Each test binary uses a different subset of the helpers here.
#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    net::SocketAddr,
    sync::Arc,
    time::Duration,
};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock, task::JoinHandle};
use url::Url;

use spotilocal::config::Config;

/// One recorded request to the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
}

struct MockState {
    oauth_token: String,
    csrf_token: String,
    status_payloads: VecDeque<Value>,
    status_delay: Duration,
    malformed_status: bool,
    requests: Vec<RecordedRequest>,
}

/// Mock control server bound to a random loopback port.
pub struct MockControlServer {
    addr: SocketAddr,
    state: Arc<RwLock<MockState>>,
    _handle: JoinHandle<()>,
}

impl MockControlServer {
    pub const OAUTH_TOKEN: &'static str = "test-oauth-token";
    pub const CSRF_TOKEN: &'static str = "test-csrf-token";

    /// Starts the mock server on a random port.
    pub async fn start() -> Self {
        let state = Arc::new(RwLock::new(MockState {
            oauth_token: Self::OAUTH_TOKEN.to_string(),
            csrf_token: Self::CSRF_TOKEN.to_string(),
            status_payloads: VecDeque::new(),
            status_delay: Duration::ZERO,
            malformed_status: false,
            requests: Vec::new(),
        }));

        let app = Router::new()
            .route("/token", get(handle_oauth_token))
            .route("/simplecsrf/token.json", get(handle_csrf_token))
            .route("/remote/status.json", get(handle_status))
            .route("/remote/pause.json", get(handle_pause))
            .route("/remote/play.json", get(handle_play))
            .route("/service/version.json", get(handle_version))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            _handle: handle,
        }
    }

    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).unwrap()
    }

    /// A client configuration pointed entirely at this mock: both the
    /// control host and the token origin.
    pub fn config(&self) -> Config {
        Config {
            origin: self.base_url(),
            base_url: Some(self.base_url()),
            ..Config::default()
        }
    }

    /// Queues a payload for the status endpoint to return immediately.
    pub async fn push_status(&self, payload: Value) {
        self.state.write().await.status_payloads.push_back(payload);
    }

    /// Delays every queued status response, simulating an in-flight
    /// long poll.
    pub async fn set_status_delay(&self, delay: Duration) {
        self.state.write().await.status_delay = delay;
    }

    /// Makes the status endpoint return a body that is not JSON.
    pub async fn set_malformed_status(&self, malformed: bool) {
        self.state.write().await.malformed_status = malformed;
    }

    /// Overrides the OAuth token the handshake hands out.
    pub async fn set_oauth_token(&self, token: &str) {
        self.state.write().await.oauth_token = token.to_string();
    }

    /// All requests recorded for the given path, in arrival order.
    pub async fn requests_for(&self, path: &str) -> Vec<RecordedRequest> {
        self.state
            .read()
            .await
            .requests
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }
}

async fn record(state: &Arc<RwLock<MockState>>, path: &str, query: &HashMap<String, String>) {
    state.write().await.requests.push(RecordedRequest {
        path: path.to_string(),
        query: query.clone(),
    });
}

async fn handle_oauth_token(State(state): State<Arc<RwLock<MockState>>>) -> Json<Value> {
    let token = state.read().await.oauth_token.clone();
    Json(json!({ "t": token }))
}

async fn handle_csrf_token(State(state): State<Arc<RwLock<MockState>>>) -> Json<Value> {
    let token = state.read().await.csrf_token.clone();
    Json(json!({ "token": token }))
}

async fn handle_status(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    record(&state, "/remote/status.json", &query).await;

    let (payload, delay, malformed) = {
        let mut guard = state.write().await;
        (
            guard.status_payloads.pop_front(),
            guard.status_delay,
            guard.malformed_status,
        )
    };

    if malformed {
        return (StatusCode::OK, "this is not json").into_response();
    }

    match payload {
        Some(payload) => {
            tokio::time::sleep(delay).await;
            Json(payload).into_response()
        }
        None => {
            // Nothing queued: hold the request open for `returnafter`
            // seconds, then answer with a heartbeat.
            let wait = query
                .get("returnafter")
                .and_then(|w| w.parse::<u64>().ok())
                .unwrap_or(60);
            tokio::time::sleep(Duration::from_secs(wait)).await;
            Json(json!({ "playing": false, "heartbeat": true })).into_response()
        }
    }
}

async fn handle_pause(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    record(&state, "/remote/pause.json", &query).await;
    Json(json!({}))
}

async fn handle_play(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    record(&state, "/remote/play.json", &query).await;
    Json(json!({ "playing": true }))
}

async fn handle_version(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    record(&state, "/service/version.json", &query).await;
    Json(json!({ "version": 9, "client_version": "1.2.3.456" }))
}
