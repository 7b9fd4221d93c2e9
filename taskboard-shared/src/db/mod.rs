//! Database layer for Taskboard
//!
//! # Modules
//!
//! - `pool`: PostgreSQL connection pool lifecycle and statistics
//! - `migrations`: embedded schema applied at startup
//!
//! Row types and their queries live in the `models` module.

pub mod migrations;
pub mod pool;
