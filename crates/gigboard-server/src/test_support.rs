//! Helpers shared by the handler tests. Only compiled for tests.

use crate::storage::{Database, MEMORY_URL};
use crate::{build_router, AppState};
use axum::{
    body::{Body, Bytes},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Router over a fresh in-memory store
pub async fn test_app() -> Router {
    test_app_with(false).await
}

pub async fn test_app_with(check_references: bool) -> Router {
    let db = Database::new(MEMORY_URL)
        .await
        .expect("in-memory database opens");
    build_router(AppState {
        store: Arc::new(db),
        check_references,
    })
}

/// Send a request with an optional JSON body
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Bytes) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid request");

    dispatch(app, request).await
}

/// Send a literal body without any `Content-Type` header
pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, Bytes) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_owned()))
        .expect("valid request");

    dispatch(app, request).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");

    (status, bytes)
}

pub fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("response body is JSON")
}
