//! Task model and database operations
//!
//! A task is a unit of work optionally assigned to a user. Its status moves
//! freely between `pending` and `completed`; there is no enforced workflow.
//!
//! # Schema
//!
//! ```sql
//! CREATE TYPE task_status AS ENUM ('pending', 'completed');
//!
//! CREATE TABLE tasks (
//!     id BIGSERIAL PRIMARY KEY,
//!     title VARCHAR(255) NOT NULL CHECK (char_length(title) > 0),
//!     description TEXT NOT NULL DEFAULT '',
//!     user_id BIGINT REFERENCES users(id) ON DELETE SET NULL,
//!     status task_status NOT NULL DEFAULT 'pending'
//! );
//! ```
//!
//! # Example
//!
//! ```no_run
//! use taskboard_shared::models::task::{NewTask, Task, TaskStatus};
//! use taskboard_shared::db::pool::{create_pool, PoolConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(&PoolConfig::new("postgresql://localhost/taskboard")).await?;
//!
//! let task = Task::create(&pool, NewTask {
//!     title: "Write report".to_string(),
//!     description: String::new(),
//!     user_id: None,
//!     status: TaskStatus::Pending,
//! }).await?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;

/// Task status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not done yet (default for new tasks)
    #[default]
    Pending,

    /// Done
    Completed,
}

impl TaskStatus {
    /// Converts status to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task record as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Store-assigned identity, never reused
    pub id: i64,

    /// Short title (non-empty)
    pub title: String,

    /// Free-form description, empty when not given
    pub description: String,

    /// Assigned user; `None` means unassigned
    pub user_id: Option<i64>,

    /// Current status
    pub status: TaskStatus,
}

/// Writable task fields, used for both insert and full replace
///
/// A replace writes every field, so defaults here overwrite whatever the
/// stored task held before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub user_id: Option<i64>,

    #[serde(default)]
    pub status: TaskStatus,
}

impl NewTask {
    /// Builds the record this input produces once an identity is assigned
    pub fn into_task(self, id: i64) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            user_id: self.user_id,
            status: self.status,
        }
    }
}

impl Task {
    /// Inserts a new task and returns it with its assigned ID
    ///
    /// # Errors
    ///
    /// Returns a foreign key violation if `user_id` names a user that does
    /// not exist; nothing is inserted in that case.
    pub async fn create(pool: &PgPool, data: NewTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, user_id, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, user_id, status
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.user_id)
        .bind(data.status)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, user_id, status
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks in insertion order
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, user_id, status
            FROM tasks
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Replaces every writable field of an existing task
    ///
    /// Single statement, so concurrent replaces of the same row are
    /// last-write-wins and never leave a mix of both inputs.
    ///
    /// # Returns
    ///
    /// The persisted task, or `None` if no row matched `id`
    pub async fn replace(
        pool: &PgPool,
        id: i64,
        data: NewTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $2,
                description = $3,
                user_id = $4,
                status = $5
            WHERE id = $1
            RETURNING id, title, description, user_id, status
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.user_id)
        .bind(data.status)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task by ID
    ///
    /// # Returns
    ///
    /// True if a task was deleted, false if none existed
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts total number of tasks
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_as_str() {
        assert_eq!(TaskStatus::Pending.as_str(), "pending");
        assert_eq!(TaskStatus::Completed.as_str(), "completed");
        assert_eq!(TaskStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn test_task_status_default_is_pending() {
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
    }

    #[test]
    fn test_task_status_rejects_unknown_value() {
        let parsed: Result<TaskStatus, _> = serde_json::from_str(r#""done""#);
        assert!(parsed.is_err());

        let parsed: TaskStatus = serde_json::from_str(r#""completed""#).unwrap();
        assert_eq!(parsed, TaskStatus::Completed);
    }

    #[test]
    fn test_new_task_defaults() {
        let data: NewTask = serde_json::from_str(r#"{"title": "Write report"}"#).unwrap();

        assert_eq!(data.title, "Write report");
        assert_eq!(data.description, "");
        assert_eq!(data.user_id, None);
        assert_eq!(data.status, TaskStatus::Pending);
    }

    #[test]
    fn test_new_task_into_task() {
        let task = NewTask {
            title: "Write report".to_string(),
            description: "draft".to_string(),
            user_id: Some(1),
            status: TaskStatus::Completed,
        }
        .into_task(3);

        assert_eq!(task.id, 3);
        assert_eq!(task.user_id, Some(1));
        assert_eq!(task.status, TaskStatus::Completed);
    }
}
