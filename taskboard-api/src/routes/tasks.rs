//! Task endpoints
//!
//! # Endpoints
//!
//! - `GET /api/tasks` - List tasks
//! - `GET /api/tasks/:id` - Get task
//! - `POST /api/tasks` - Create task
//! - `PUT /api/tasks/:id` - Replace task
//! - `DELETE /api/tasks/:id` - Delete task
//!
//! POST and PUT take the same body. PUT is a full replace: fields left out
//! are written with their defaults (`description: ""`, `user_id: null`,
//! `status: "pending"`), not kept from the stored task.

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taskboard_shared::models::task::{NewTask, Task, TaskStatus};
use validator::Validate;

/// Create/replace task request
#[derive(Debug, Deserialize, Validate)]
pub struct TaskRequest {
    #[validate(
        required(message = "Title is required"),
        length(min = 1, max = 255, message = "Title must be 1-255 characters")
    )]
    pub title: Option<String>,

    /// Defaults to an empty string; `null` is treated as absent
    pub description: Option<String>,

    /// Assigned user; absent or `null` leaves the task unassigned
    pub user_id: Option<i64>,

    /// `pending` or `completed`; defaults to `pending`
    pub status: Option<TaskStatus>,
}

impl TaskRequest {
    /// Converts a validated request into store input, filling defaults
    pub fn into_new_task(self) -> NewTask {
        NewTask {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            user_id: self.user_id,
            status: self.status.unwrap_or_default(),
        }
    }
}

/// List tasks
///
/// ```text
/// GET /api/tasks
/// ```
///
/// Returns every task in insertion order.
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(state.store.list_tasks().await?))
}

/// Get task
///
/// ```text
/// GET /api/tasks/:id
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: id is not an integer
/// - `404 Not Found`: no such task
pub async fn get_task(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Task>> {
    let Path(id) = id?;
    Ok(Json(state.store.get_task(id).await?))
}

/// Create task
///
/// ```text
/// POST /api/tasks
/// Content-Type: application/json
///
/// {"title": "Write report", "user_id": 1}
/// ```
///
/// # Response
///
/// ```json
/// {"id": 1, "title": "Write report", "description": "", "user_id": 1, "status": "pending"}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: body is not valid JSON for this shape (e.g. unknown status)
/// - `409 Conflict`: `user_id` does not reference an existing user
/// - `422 Unprocessable Entity`: missing or empty title
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskRequest>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Json(req) = payload?;
    req.validate()?;

    let task = state.store.create_task(req.into_new_task()).await?;
    tracing::info!(task_id = task.id, user_id = ?task.user_id, "Task created");

    Ok(Json(task))
}

/// Replace task
///
/// ```text
/// PUT /api/tasks/:id
/// Content-Type: application/json
///
/// {"title": "Write report", "description": "v2", "user_id": 1, "status": "completed"}
/// ```
///
/// Returns the persisted record. Concurrent replaces are last-write-wins.
///
/// # Errors
///
/// - `400`/`409`/`422`: as for create
/// - `404 Not Found`: no such task
pub async fn update_task(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TaskRequest>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Path(id) = id?;
    let Json(req) = payload?;
    req.validate()?;

    let task = state.store.update_task(id, req.into_new_task()).await?;
    tracing::info!(task_id = task.id, status = %task.status, "Task replaced");

    Ok(Json(task))
}

/// Delete task
///
/// ```text
/// DELETE /api/tasks/:id
/// ```
///
/// Responds `204 No Content`.
///
/// # Errors
///
/// - `404 Not Found`: no such task
pub async fn delete_task(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state.store.delete_task(id).await?;
    tracing::info!(task_id = id, "Task deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_filled() {
        let req: TaskRequest = serde_json::from_str(r#"{"title": "Write report"}"#).unwrap();
        assert!(req.validate().is_ok());

        let task = req.into_new_task();
        assert_eq!(task.description, "");
        assert_eq!(task.user_id, None);
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[test]
    fn test_null_fields_are_defaults() {
        let req: TaskRequest = serde_json::from_str(
            r#"{"title": "t", "description": null, "user_id": null, "status": null}"#,
        )
        .unwrap();

        let task = req.into_new_task();
        assert_eq!(task.description, "");
        assert_eq!(task.user_id, None);
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[test]
    fn test_missing_or_empty_title_fails_validation() {
        let req: TaskRequest = serde_json::from_str(r#"{"user_id": 1}"#).unwrap();
        assert!(req.validate().unwrap_err().field_errors().contains_key("title"));

        let req: TaskRequest = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_wrong_types_do_not_deserialize() {
        assert!(serde_json::from_str::<TaskRequest>(r#"{"title": "t", "user_id": "one"}"#).is_err());
        assert!(serde_json::from_str::<TaskRequest>(r#"{"title": "t", "status": "done"}"#).is_err());
    }
}
