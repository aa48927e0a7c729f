//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use referrals::client::HttpReferralApi;
use referrals::db::ReferralRepository;
use referrals::domain::ReferralDraft;
use referrals::server::{build_router, AppState, ReferralServer, ServerHandle};
use referrals::store::{ReferralContext, RecordingNotifier};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

pub const TOKEN: &str = "test-token";

/// Router over a fresh in-memory database.
pub fn test_app() -> (Router, Arc<ReferralRepository>) {
    let repository = Arc::new(ReferralRepository::in_memory().expect("in-memory database"));
    let router = build_router(AppState::new(repository.clone(), TOKEN));
    (router, repository)
}

/// Request with the test bearer token and an optional JSON body.
pub fn authed(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"));
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Drive one request through the router. Empty bodies decode as `Value::Null`.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    use tower::ServiceExt;

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

/// Full create body, unique by `email`.
pub fn referral_json(email: &str) -> Value {
    json!({
        "givenName": "John",
        "surname": "Smith",
        "email": email,
        "phone": "+61412345678",
        "homeNameOrNumber": "123",
        "street": "Collins Street",
        "suburb": "Melbourne",
        "state": "Victoria",
        "postcode": "3000",
        "country": "Australia",
        "status": "pending",
        "notes": "Interested in web development course",
        "referredBy": "Sarah Johnson"
    })
}

/// Only the required fields.
pub fn minimal_json(email: &str) -> Value {
    json!({
        "givenName": "Jane",
        "surname": "Doe",
        "email": email,
        "phone": "0400000000",
        "homeNameOrNumber": "1",
        "street": "Main Street",
        "suburb": "Richmond",
        "state": "VIC",
        "postcode": "3121"
    })
}

pub fn draft(given: &str, surname: &str, email: &str) -> ReferralDraft {
    serde_json::from_value(json!({
        "givenName": given,
        "surname": surname,
        "email": email,
        "phone": "0400000000",
        "homeNameOrNumber": "12",
        "street": "Main Street",
        "suburb": "Richmond",
        "state": "VIC",
        "postcode": "3121"
    }))
    .unwrap()
}

/// A real service on an ephemeral port, backed by an in-memory database.
pub struct TestServer {
    pub addr: SocketAddr,
    pub base_url: String,
    handle: ServerHandle,
    task: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let repository = ReferralRepository::in_memory().expect("in-memory database");
        let server = ReferralServer::bind("127.0.0.1:0".parse().unwrap(), repository, TOKEN)
            .await
            .expect("bind test server");
        let addr = server.addr();
        let base_url = server.base_url();
        let handle = server.handle();
        let task = tokio::spawn(async move {
            server.run().await.expect("server run");
        });
        assert!(wait_for_server(addr, Duration::from_secs(2)).await);
        Self {
            addr,
            base_url,
            handle,
            task,
        }
    }

    pub fn api(&self, token: &str) -> HttpReferralApi {
        HttpReferralApi::new(&self.base_url, token, Duration::from_secs(5)).unwrap()
    }

    /// Hook context against this server with a recording notifier.
    pub fn context(&self) -> (ReferralContext, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let ctx = ReferralContext::new(Arc::new(self.api(TOKEN)), notifier.clone());
        (ctx, notifier)
    }

    pub async fn stop(self) {
        self.handle.shutdown();
        let _ = tokio::time::timeout(Duration::from_secs(2), self.task).await;
    }
}

/// Wait for a server to accept connections.
pub async fn wait_for_server(addr: SocketAddr, timeout: Duration) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
