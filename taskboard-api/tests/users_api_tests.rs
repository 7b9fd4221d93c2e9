//! Integration tests for the user endpoints
//!
//! Runs the full router (middleware included) over an in-memory store.

mod common;

use axum::http::{Method, StatusCode};
use common::TestContext;
use serde_json::json;

#[tokio::test]
async fn test_create_and_get_user() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .post("/api/users", json!({"name": "Ann", "email": "ann@x.com"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "name": "Ann", "email": "ann@x.com"}));

    let (status, body) = ctx.get("/api/users/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ann");
    assert_eq!(body["email"], "ann@x.com");
}

#[tokio::test]
async fn test_list_users_in_insertion_order() {
    let ctx = TestContext::new();

    let (_, body) = ctx.get("/api/users").await;
    assert_eq!(body, json!([]));

    for name in ["Ann", "Bob", "Cid"] {
        let email = format!("{}@x.com", name.to_lowercase());
        let (status, _) = ctx
            .post("/api/users", json!({"name": name, "email": email}))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = ctx.get("/api/users").await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ann", "Bob", "Cid"]);
}

#[tokio::test]
async fn test_duplicate_email_is_allowed() {
    let ctx = TestContext::new();
    let user = json!({"name": "Ann", "email": "ann@x.com"});

    let (first, _) = ctx.post("/api/users", user.clone()).await;
    let (second, body) = ctx.post("/api/users", user).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(body["id"], 2);
}

#[tokio::test]
async fn test_replace_user_returns_persisted_record() {
    let ctx = TestContext::new();
    ctx.post("/api/users", json!({"name": "Ann", "email": "ann@x.com"}))
        .await;

    let (status, body) = ctx
        .put("/api/users/1", json!({"name": "Ann B", "email": "ann@y.com"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "name": "Ann B", "email": "ann@y.com"}));

    let (_, body) = ctx.get("/api/users/1").await;
    assert_eq!(body["email"], "ann@y.com");
}

#[tokio::test]
async fn test_replace_requires_every_field() {
    let ctx = TestContext::new();
    ctx.post("/api/users", json!({"name": "Ann", "email": "ann@x.com"}))
        .await;

    let (status, body) = ctx.put("/api/users/1", json!({"name": "Ann B"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "email");

    let (_, body) = ctx.get("/api/users/1").await;
    assert_eq!(body["name"], "Ann");
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get("/api/users/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, _) = ctx
        .put("/api/users/42", json!({"name": "Ann", "email": "ann@x.com"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx.delete("/api/users/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user_twice() {
    let ctx = TestContext::new();
    ctx.post("/api/users", json!({"name": "Ann", "email": "ann@x.com"}))
        .await;

    let (status, body) = ctx.delete("/api/users/1").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = ctx.delete("/api/users/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx.get("/api/users/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let ctx = TestContext::new();
    ctx.post("/api/users", json!({"name": "Ann", "email": "ann@x.com"}))
        .await;
    ctx.delete("/api/users/1").await;

    let (_, body) = ctx
        .post("/api/users", json!({"name": "Bob", "email": "bob@x.com"}))
        .await;
    assert_eq!(body["id"], 2);
}

#[tokio::test]
async fn test_validation_errors_are_unprocessable() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .post("/api/users", json!({"name": "", "email": "not-an-email"}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");

    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|detail| detail["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "name"]);

    let (_, body) = ctx.get("/api/users").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_malformed_requests_are_bad_requests() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send_raw(Method::POST, "/api/users", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, _) = ctx
        .post("/api/users", json!({"name": 7, "email": "ann@x.com"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx.get("/api/users/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
