//! Storage abstraction for users and tasks
//!
//! The API layer talks to a [`Store`] and never to a pool or a query
//! directly. Two backends implement it:
//!
//! - [`postgres::PgStore`]: the production backend, one SQL statement per operation
//! - [`memory::MemoryStore`]: process-local tables with the same integrity rules
//!
//! # Integrity rules
//!
//! Every backend guarantees:
//! - identities are assigned by the store, increase monotonically per
//!   collection and are never reused after a delete
//! - a task's `user_id` is either `None` or the id of an existing user;
//!   writes that break this fail with [`StoreError::ConstraintViolation`]
//!   and persist nothing
//! - deleting a user unassigns its tasks (`user_id` becomes `None`)
//! - get, replace and delete of an absent id fail with [`StoreError::NotFound`]
//! - a replace is atomic: concurrent replaces of one record leave exactly
//!   one of the inputs, never a mix
//!
//! # Example
//!
//! ```
//! use taskboard_shared::models::task::{NewTask, TaskStatus};
//! use taskboard_shared::models::user::NewUser;
//! use taskboard_shared::store::{memory::MemoryStore, Store};
//!
//! # async fn example() -> Result<(), taskboard_shared::store::StoreError> {
//! let store = MemoryStore::new();
//!
//! let ann = store.create_user(NewUser {
//!     name: "Ann".to_string(),
//!     email: "ann@x.com".to_string(),
//! }).await?;
//!
//! let task = store.create_task(NewTask {
//!     title: "Write report".to_string(),
//!     description: String::new(),
//!     user_id: Some(ann.id),
//!     status: TaskStatus::default(),
//! }).await?;
//!
//! assert_eq!(task.status, TaskStatus::Pending);
//! # Ok(())
//! # }
//! ```

pub mod memory;
pub mod postgres;

use crate::db::pool::PoolStats;
use crate::models::task::{NewTask, Task};
use crate::models::user::{NewUser, User};
use async_trait::async_trait;
use std::fmt;

/// Record collections managed by a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Task,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::User => f.write_str("User"),
            Entity::Task => f.write_str("Task"),
        }
    }
}

/// Store error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record with this identity
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: i64 },

    /// A foreign key, not-null, check or unique constraint rejected the write
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// The store could not interpret a value it was given
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The store cannot be reached (I/O, pool exhausted or closed)
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(String),
}

impl StoreError {
    /// Short label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "not_found",
            StoreError::ConstraintViolation(_) => "constraint_violation",
            StoreError::MalformedInput(_) => "malformed_input",
            StoreError::Unavailable(_) => "unavailable",
            StoreError::Database(_) => "database",
        }
    }

    pub(crate) fn not_found(entity: Entity, id: i64) -> Self {
        StoreError::NotFound { entity, id }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        match err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation
                | ErrorKind::UniqueViolation => {
                    let constraint = db_err.constraint().unwrap_or("unnamed").to_string();
                    StoreError::ConstraintViolation(format!(
                        "{} ({})",
                        db_err.message(),
                        constraint
                    ))
                }
                // SQLSTATE class 22: data exception (bad format, value too long, ...)
                _ if db_err.code().is_some_and(|code| code.starts_with("22")) => {
                    StoreError::MalformedInput(db_err.message().to_string())
                }
                _ => StoreError::Database(db_err.to_string()),
            },
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
            _ => StoreError::Database(err.to_string()),
        }
    }
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistent collections of users and tasks
///
/// Implementations are shared between request handlers as
/// `Arc<dyn Store>` and must be safe to call concurrently.
#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name for logs ("postgres", "memory")
    fn backend(&self) -> &'static str;

    /// All users in insertion order
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    async fn get_user(&self, id: i64) -> StoreResult<User>;

    /// Inserts a user and returns it with its assigned identity
    async fn create_user(&self, data: NewUser) -> StoreResult<User>;

    /// Replaces all writable fields of a user, returning the persisted record
    async fn update_user(&self, id: i64, data: NewUser) -> StoreResult<User>;

    /// Deletes a user and unassigns its tasks
    async fn delete_user(&self, id: i64) -> StoreResult<()>;

    /// All tasks in insertion order
    async fn list_tasks(&self) -> StoreResult<Vec<Task>>;

    async fn get_task(&self, id: i64) -> StoreResult<Task>;

    /// Inserts a task and returns it with its assigned identity
    async fn create_task(&self, data: NewTask) -> StoreResult<Task>;

    /// Replaces all writable fields of a task, returning the persisted record
    async fn update_task(&self, id: i64, data: NewTask) -> StoreResult<Task>;

    async fn delete_task(&self, id: i64) -> StoreResult<()>;

    /// Verifies the backend can serve requests
    async fn health_check(&self) -> StoreResult<()>;

    /// Connection pool usage, if the backend has a pool
    fn pool_stats(&self) -> Option<PoolStats> {
        None
    }
}
