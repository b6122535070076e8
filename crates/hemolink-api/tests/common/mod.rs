//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use hemolink_api::build_router;
use hemolink_api::state::AppState;
use hemolink_core::clock::Clock;
use hemolink_dispatch::audit::AuditLogHandler;
use hemolink_dispatch::publisher::InProcessPublisher;
use hemolink_store::memory::{
    MemoryAppointmentRepository, MemoryDonorRepository, MemoryMatchRepository,
    MemoryPostRepository, MemoryRequestRepository,
};
use hemolink_test_support::FixedClock;

/// Fixed timestamp used across all integration tests: 2026-02-10 08:30 UTC.
pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 2, 10, 8, 30, 0).unwrap(),
    ))
}

/// Build the full app router over in-memory repositories with a fixed clock.
/// Uses the same route structure as `main.rs`.
pub fn build_test_app() -> Router {
    let publisher = InProcessPublisher::new().with_handler(Arc::new(AuditLogHandler));
    let app_state = AppState {
        clock: fixed_clock(),
        publisher: Arc::new(publisher),
        donors: Arc::new(MemoryDonorRepository::new()),
        requests: Arc::new(MemoryRequestRepository::new()),
        matches: Arc::new(MemoryMatchRepository::new()),
        appointments: Arc::new(MemoryAppointmentRepository::new()),
        posts: Arc::new(MemoryPostRepository::new()),
    };
    build_router(app_state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
