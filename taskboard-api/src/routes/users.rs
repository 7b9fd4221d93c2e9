//! User endpoints
//!
//! # Endpoints
//!
//! - `GET /api/users` - List users
//! - `GET /api/users/:id` - Get user
//! - `POST /api/users` - Create user
//! - `PUT /api/users/:id` - Replace user
//! - `DELETE /api/users/:id` - Delete user; its tasks become unassigned

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
use taskboard_shared::models::user::{NewUser, User};
use validator::Validate;

/// Create/replace user request
///
/// Both fields are required on every write; PUT replaces the whole record.
#[derive(Debug, Deserialize, Validate)]
pub struct UserRequest {
    #[validate(
        required(message = "Name is required"),
        length(min = 1, max = 255, message = "Name must be 1-255 characters")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Email is required"),
        email(message = "Email must be a valid email address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: Option<String>,
}

impl UserRequest {
    /// Converts a validated request into store input
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
        }
    }
}

/// List users
///
/// ```text
/// GET /api/users
/// ```
///
/// Returns every user in insertion order.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.store.list_users().await?))
}

/// Get user
///
/// ```text
/// GET /api/users/:id
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: id is not an integer
/// - `404 Not Found`: no such user
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<User>> {
    let Path(id) = id?;
    Ok(Json(state.store.get_user(id).await?))
}

/// Create user
///
/// ```text
/// POST /api/users
/// Content-Type: application/json
///
/// {"name": "Ann", "email": "ann@x.com"}
/// ```
///
/// # Response
///
/// ```json
/// {"id": 1, "name": "Ann", "email": "ann@x.com"}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: body is not valid JSON for this shape
/// - `422 Unprocessable Entity`: missing/empty name or invalid email
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let Json(req) = payload?;
    req.validate()?;

    let user = state.store.create_user(req.into_new_user()).await?;
    tracing::info!(user_id = user.id, "User created");

    Ok(Json(user))
}

/// Replace user
///
/// ```text
/// PUT /api/users/:id
/// Content-Type: application/json
///
/// {"name": "Ann B", "email": "ann@y.com"}
/// ```
///
/// Returns the persisted record.
///
/// # Errors
///
/// - `400`/`422`: as for create
/// - `404 Not Found`: no such user
pub async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let Path(id) = id?;
    let Json(req) = payload?;
    req.validate()?;

    let user = state.store.update_user(id, req.into_new_user()).await?;
    tracing::info!(user_id = user.id, "User replaced");

    Ok(Json(user))
}

/// Delete user
///
/// ```text
/// DELETE /api/users/:id
/// ```
///
/// Responds `204 No Content`. Tasks assigned to the user are kept and
/// become unassigned.
///
/// # Errors
///
/// - `404 Not Found`: no such user
pub async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state.store.delete_user(id).await?;
    tracing::info!(user_id = id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
