//! # Taskboard Shared Library
//!
//! Data model and storage for the Taskboard API: users, the tasks assigned
//! to them, and the stores that persist both.
//!
//! ## Module Organization
//!
//! - `models`: row types and PostgreSQL queries
//! - `db`: connection pool and schema bootstrap
//! - `store`: the `Store` trait with PostgreSQL and in-memory backends

pub mod db;
pub mod models;
pub mod store;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
