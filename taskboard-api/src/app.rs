//! Application state and router builder
//!
//! This module defines the shared application state and provides
//! a function to build the Axum router with all routes and middleware.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskboard_api::{app::{build_router, AppState}, config::Config};
//! use taskboard_shared::store::memory::MemoryStore;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let state = AppState::new(Arc::new(MemoryStore::new()), config);
//! let app = build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

use crate::{config::Config, metrics, middleware::security::security_headers, routes};
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use taskboard_shared::store::Store;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler via Axum's `State` extractor. Holds no
/// records, only handles to the store and the configuration.
#[derive(Clone)]
pub struct AppState {
    /// Store serving every request
    pub store: Arc<dyn Store>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET /                     # Liveness banner
/// ├── GET /health               # Store connectivity
/// ├── GET /metrics              # Prometheus exposition
/// └── /api/
///     ├── /users
///     │   ├── GET    /          # List users
///     │   ├── POST   /          # Create user
///     │   ├── GET    /:id       # Get user
///     │   ├── PUT    /:id       # Replace user
///     │   └── DELETE /:id       # Delete user (unassigns tasks)
///     └── /tasks
///         ├── GET    /          # List tasks
///         ├── POST   /          # Create task
///         ├── GET    /:id       # Get task
///         ├── PUT    /:id       # Replace task
///         └── DELETE /:id       # Delete task
/// ```
///
/// # Middleware Stack
///
/// Applied in order (innermost first):
/// 1. Request metrics (per matched route)
/// 2. Logging (tower-http TraceLayer)
/// 3. CORS (tower-http CorsLayer)
/// 4. Security headers
pub fn build_router(state: AppState) -> Router {
    metrics::register_metrics();

    let user_routes = Router::new()
        .route(
            "/",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route(
            "/:id",
            get(routes::users::get_user)
                .put(routes::users::update_user)
                .delete(routes::users::delete_user),
        );

    let task_routes = Router::new()
        .route(
            "/",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        );

    let api_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/tasks", task_routes);

    let cors = cors_layer(&state.config);
    let enable_hsts = state.config.api.production;

    Router::new()
        .route("/", get(routes::health::banner))
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(metrics::metrics_handler))
        .nest("/api", api_routes)
        .route_layer(middleware::from_fn(metrics::track_requests))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(middleware::from_fn_with_state(enable_hsts, security_headers))
        .with_state(state)
}

/// CORS policy from configuration: permissive for `*`, else an allow-list
fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(std::time::Duration::from_secs(3600))
}
