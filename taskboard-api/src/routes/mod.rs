//! API route handlers
//!
//! This module contains all route handlers organized by resource:
//!
//! - `health`: Liveness banner and store health check
//! - `users`: `/api/users` CRUD
//! - `tasks`: `/api/tasks` CRUD

pub mod health;
pub mod tasks;
pub mod users;
