//! In-process request helpers for handler tests.
//!
//! Requests go straight into the router through `tower::ServiceExt::oneshot`;
//! no socket is bound.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;

use crate::state::test_helpers::{Mocks, mock_app_state};

/// Router wired to fresh mocks, CORS disabled.
pub fn mock_app() -> (Router, Mocks) {
    let (state, mocks) = mock_app_state();
    (super::app(state, false), mocks)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or_else(|e| panic!("body is not JSON ({e}): {}", self.body))
    }
}

pub async fn send(app: &Router, method: Method, path: &str, body: Option<serde_json::Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(path);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse { status, body: String::from_utf8(bytes.to_vec()).unwrap() }
}

pub async fn get(app: &Router, path: &str) -> TestResponse {
    send(app, Method::GET, path, None).await
}

pub async fn post(app: &Router, path: &str, body: serde_json::Value) -> TestResponse {
    send(app, Method::POST, path, Some(body)).await
}

pub async fn put(app: &Router, path: &str, body: serde_json::Value) -> TestResponse {
    send(app, Method::PUT, path, Some(body)).await
}

pub async fn delete(app: &Router, path: &str) -> TestResponse {
    send(app, Method::DELETE, path, None).await
}
