//! # Taskboard API Server Library
//!
//! HTTP layer for Taskboard: CRUD endpoints for users and tasks on top of a
//! [`taskboard_shared::store::Store`].
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `metrics`: Prometheus metrics and the `/metrics` endpoint
//! - `middleware`: Response header middleware
//! - `routes`: API route handlers
//! - `shutdown`: Graceful shutdown signal

pub mod app;
pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod shutdown;
