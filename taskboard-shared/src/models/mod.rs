//! Database models for Taskboard
//!
//! Each model carries its row type, its writable-field input type and the
//! PostgreSQL queries that back it.
//!
//! # Models
//!
//! - `user`: people tasks can be assigned to
//! - `task`: units of work with a `pending`/`completed` status
//!
//! # Example
//!
//! ```no_run
//! use taskboard_shared::models::user::{NewUser, User};
//! use taskboard_shared::db::pool::{create_pool, PoolConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(&PoolConfig::new("postgresql://localhost/taskboard")).await?;
//!
//! let user = User::create(&pool, NewUser {
//!     name: "Ann".to_string(),
//!     email: "ann@example.com".to_string(),
//! }).await?;
//! # Ok(())
//! # }
//! ```

pub mod task;
pub mod user;
