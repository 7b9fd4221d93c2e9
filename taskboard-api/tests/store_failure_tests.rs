//! Integration tests for requests served while the store is failing
//!
//! The router runs over a store whose every call errors, so these cover the
//! 5xx mappings, the degraded health report and that store details never
//! reach the client.

mod common;

use axum::http::StatusCode;
use common::{FailingStore, TestContext};
use serde_json::json;

#[tokio::test]
async fn test_unavailable_store_is_service_unavailable() {
    let ctx = TestContext::with_store(FailingStore::unavailable());

    let (status, body) = ctx.get("/api/tasks").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "service_unavailable");
    assert!(!body.to_string().contains("connection refused"));

    let (status, _) = ctx.get("/api/users/1").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = ctx.delete("/api/tasks/1").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_database_error_is_internal_and_hidden() {
    let ctx = TestContext::with_store(FailingStore::database());

    let (status, body) = ctx
        .post("/api/users", json!({"name": "Ann", "email": "ann@x.com"}))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "internal_error", "message": "An internal error occurred"})
    );

    let (status, body) = ctx.put("/api/tasks/1", json!({"title": "t"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.to_string().contains("does not exist"));
}

#[tokio::test]
async fn test_invalid_requests_are_rejected_before_the_store() {
    let ctx = TestContext::with_store(FailingStore::unavailable());

    let (status, _) = ctx.post("/api/tasks", json!({"title": ""})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = ctx.get("/api/tasks/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_reports_degraded_store() {
    let ctx = TestContext::with_store(FailingStore::unavailable());

    let (status, body) = ctx.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["backend"], "failing");
    assert_eq!(body["store"], "disconnected");

    let (status, _) = ctx.get("/").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_store_failures_are_counted_by_kind() {
    let ctx = TestContext::with_store(FailingStore::unavailable());
    ctx.get("/api/users").await;

    let (_, body) = ctx.get("/metrics").await;
    assert!(body
        .as_str()
        .unwrap()
        .contains("taskboard_store_errors_total{kind=\"unavailable\"}"));
}
