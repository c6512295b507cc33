// Shared test doubles: a local stand-in for the Safe Browsing endpoint and
// an in-process ThreatChecker with a canned answer.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use serde_json::Value;

use securelink::safebrowsing::traits::{CheckError, CheckResult, ThreatChecker};

/// One request as seen by the mock endpoint.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub key: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// A running mock Safe Browsing server on 127.0.0.1.
pub struct MockSafeBrowsing {
    pub endpoint: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockSafeBrowsing {
    /// Answer every lookup with `status` and `body` immediately.
    pub async fn start(status: StatusCode, body: &'static str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    /// Answer every lookup with `status` and `body` after sleeping `delay`.
    pub async fn start_with_delay(status: StatusCode, body: &'static str, delay: Duration) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            body,
            delay,
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/v4/{method}", post(find_threat_matches))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });

        Self {
            endpoint: format!("http://{addr}/v4/threatMatches:find"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn find_threat_matches(
    State(state): State<MockState>,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> impl IntoResponse {
    state.requests.lock().unwrap().push(RecordedRequest {
        key: query.get("key").cloned(),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

/// What a `StubChecker` answers with.
#[derive(Debug, Clone)]
pub enum StubAnswer {
    Threats(Vec<&'static str>),
    Network,
    Decode,
}

/// In-process checker that counts calls and returns a fixed answer.
pub struct StubChecker {
    answer: StubAnswer,
    calls: AtomicUsize,
}

impl StubChecker {
    pub fn new(answer: StubAnswer) -> Arc<Self> {
        Arc::new(Self {
            answer,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ThreatChecker for StubChecker {
    async fn check(&self, _url: &str, _timeout: Duration) -> Result<CheckResult, CheckError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            StubAnswer::Threats(threats) => Ok(CheckResult::from_threats(
                threats.iter().map(|t| t.to_string()).collect(),
            )),
            StubAnswer::Network => Err(CheckError::NetworkFailure("timed out".to_string())),
            StubAnswer::Decode => Err(CheckError::DecodeFailure("bad json".to_string())),
        }
    }
}
