//! Health endpoints
//!
//! # Endpoints
//!
//! ```text
//! GET /        -> "Task Service is running"
//! GET /health  -> {"status": "healthy", "version": "0.1.0", "backend": "memory", "store": "connected"}
//! ```
//!
//! `/health` always answers 200; a store that fails its check is reported
//! as `"degraded"` / `"disconnected"` so probes can tell the process is up.

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Store backend name
    pub backend: String,

    /// Store status
    pub store: String,
}

/// Plain-text liveness banner
pub async fn banner() -> &'static str {
    "Task Service is running"
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_status = match state.store.health_check().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            "disconnected"
        }
    };

    Json(HealthResponse {
        status: if store_status == "connected" {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.store.backend().to_string(),
        store: store_status.to_string(),
    })
}
