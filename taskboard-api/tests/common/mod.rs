//! Common test utilities for integration tests
//!
//! Builds the full router over a fresh in-memory store (or a store that
//! always fails) and offers small helpers to send JSON requests and read
//! JSON responses.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::{ApiConfig, Config, StoreBackend, StoreConfig};
use taskboard_shared::models::task::{NewTask, Task};
use taskboard_shared::models::user::{NewUser, User};
use taskboard_shared::store::memory::MemoryStore;
use taskboard_shared::store::{Store, StoreError, StoreResult};
use tower::ServiceExt;

/// Test context containing the router and the store behind it
pub struct TestContext<S = MemoryStore> {
    pub app: Router,
    pub store: Arc<S>,
}

impl TestContext {
    /// Creates a router over an empty in-memory store
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }
}

impl<S: Store + 'static> TestContext<S> {
    /// Creates a router over `store`
    pub fn with_store(store: S) -> Self {
        let store = Arc::new(store);
        let state = AppState::new(store.clone(), test_config());

        TestContext {
            app: build_router(state),
            store,
        }
    }

    /// Sends a request with an optional JSON body
    ///
    /// Returns the status and the parsed body (`Value::Null` when empty,
    /// `Value::String` when the body is not JSON).
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.call(request).await
    }

    /// Sends a raw body with a JSON content type
    pub async fn send_raw(&self, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.call(request).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, body)
    }
}

/// Configuration for tests: permissive CORS, memory backend
pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            production: false,
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
            database: None,
        },
    }
}

/// Store whose every operation fails with the same error
pub struct FailingStore {
    make_error: fn() -> StoreError,
}

impl FailingStore {
    /// Fails as if the database could not be reached
    pub fn unavailable() -> Self {
        Self {
            make_error: || StoreError::Unavailable("connection refused (os error 111)".to_string()),
        }
    }

    /// Fails with an unclassified database error
    pub fn database() -> Self {
        Self {
            make_error: || StoreError::Database(r#"relation "tasks" does not exist"#.to_string()),
        }
    }

    fn fail<T>(&self) -> StoreResult<T> {
        Err((self.make_error)())
    }
}

#[async_trait::async_trait]
impl Store for FailingStore {
    fn backend(&self) -> &'static str {
        "failing"
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.fail()
    }

    async fn get_user(&self, _id: i64) -> StoreResult<User> {
        self.fail()
    }

    async fn create_user(&self, _data: NewUser) -> StoreResult<User> {
        self.fail()
    }

    async fn update_user(&self, _id: i64, _data: NewUser) -> StoreResult<User> {
        self.fail()
    }

    async fn delete_user(&self, _id: i64) -> StoreResult<()> {
        self.fail()
    }

    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        self.fail()
    }

    async fn get_task(&self, _id: i64) -> StoreResult<Task> {
        self.fail()
    }

    async fn create_task(&self, _data: NewTask) -> StoreResult<Task> {
        self.fail()
    }

    async fn update_task(&self, _id: i64, _data: NewTask) -> StoreResult<Task> {
        self.fail()
    }

    async fn delete_task(&self, _id: i64) -> StoreResult<()> {
        self.fail()
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.fail()
    }
}
