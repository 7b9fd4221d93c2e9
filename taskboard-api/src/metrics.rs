//! Prometheus metrics for the Taskboard API.
//!
//! Exposes request counts and latency per matched route, store failures by
//! kind, and connection pool usage. Metrics carry no record contents.

use crate::app::AppState;
use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry,
    TextEncoder,
};
use std::sync::{LazyLock, Once};
use std::time::Instant;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

pub static HTTP_REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "taskboard_http_requests_total",
            "Total HTTP requests by method, route and status",
        ),
        &["method", "route", "status"],
    )
    .expect("metric creation failed")
});

pub static HTTP_REQUEST_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "taskboard_http_request_duration_seconds",
            "HTTP request latency by method and route",
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]),
        &["method", "route"],
    )
    .expect("metric creation failed")
});

pub static STORE_ERRORS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "taskboard_store_errors_total",
            "Total store operation failures by error kind",
        ),
        &["kind"],
    )
    .expect("metric creation failed")
});

pub static DB_POOL_CONNECTIONS: LazyLock<IntGaugeVec> = LazyLock::new(|| {
    IntGaugeVec::new(
        Opts::new(
            "taskboard_db_pool_connections",
            "Database pool connections by state",
        ),
        &["state"],
    )
    .expect("metric creation failed")
});

/// Guard to ensure metrics are only registered once.
static REGISTER_ONCE: Once = Once::new();

/// Register all metrics with the global registry.
///
/// Idempotent, so every router built in tests can call it.
pub fn register_metrics() {
    REGISTER_ONCE.call_once(|| {
        REGISTRY
            .register(Box::new(HTTP_REQUESTS.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(HTTP_REQUEST_DURATION.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(STORE_ERRORS.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(DB_POOL_CONNECTIONS.clone()))
            .expect("metric registration failed");
    });
}

/// Counts a failed store operation.
pub fn record_store_error(kind: &str) {
    STORE_ERRORS.with_label_values(&[kind]).inc();
}

/// Records count and latency of every request, labelled by matched route
/// so path ids do not explode label cardinality.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();
    HTTP_REQUESTS
        .with_label_values(&[method.as_str(), route.as_str(), status.as_str()])
        .inc();
    HTTP_REQUEST_DURATION
        .with_label_values(&[method.as_str(), route.as_str()])
        .observe(elapsed);

    response
}

/// GET /metrics - Prometheus metrics endpoint.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    if let Some(stats) = state.store.pool_stats() {
        DB_POOL_CONNECTIONS
            .with_label_values(&["active"])
            .set(stats.active_connections as i64);
        DB_POOL_CONNECTIONS
            .with_label_values(&["idle"])
            .set(stats.idle_connections as i64);
    }

    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}").into_bytes(),
        ),
    }
}
