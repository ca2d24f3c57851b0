// tests/support/helpers.rs
use std::sync::Arc;

use super::mocks;
use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode, header::AUTHORIZATION};
use profil_cms::{
    application::{ports::time::Clock, services::ApplicationServices},
    infrastructure::{repositories::in_memory_repositories, util::DefaultSlugGenerator},
    presentation::http::{
        routes::{RouterOptions, build_router},
        state::HttpState,
    },
};
use serde_json::Value;

pub fn build_services_with_clock(clock: Arc<dyn Clock>) -> Arc<ApplicationServices> {
    Arc::new(ApplicationServices::new(
        in_memory_repositories(),
        Arc::new(mocks::test_authorizer()),
        Arc::new(mocks::test_token_resolver()),
        clock,
        Arc::new(DefaultSlugGenerator),
        10,
    ))
}

/// Services over empty in-memory stores with a clock that steps per reading.
pub fn build_services() -> Arc<ApplicationServices> {
    build_services_with_clock(Arc::new(mocks::StepClock::default()))
}

pub fn make_router_for(services: Arc<ApplicationServices>) -> axum::Router {
    let options = RouterOptions {
        allowed_origins: Vec::new(),
        rate_limit_per_second: 0,
    };
    build_router(HttpState { services }, &options)
}

pub fn make_test_router() -> axum::Router {
    make_router_for(build_services())
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("build request"),
        None => builder.body(Body::empty()).expect("build request"),
    }
}

pub async fn read_json(resp: axum::response::Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("expected json body")
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(
    resp: axum::response::Response,
    expected_status: StatusCode,
    expected_error: &str,
) -> Value {
    assert_eq!(resp.status(), expected_status);
    let ct = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json = read_json(resp).await;
    let err_field = json.get("error").and_then(Value::as_str).unwrap_or("");
    let msg_field = json.get("message").and_then(Value::as_str).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
    json
}
