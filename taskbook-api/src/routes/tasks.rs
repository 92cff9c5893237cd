//! Task endpoints
//!
//! All routes here sit behind the bearer-auth layer. Operations on a single
//! task are owner-scoped: the handler fetches by id first, answers 404 when
//! the task does not exist, and 403 when it exists but belongs to someone
//! else — existence is not a secret, ownership is enforced after confirming
//! it.
//!
//! - `POST /api/tasks` - Create a task owned by the caller
//! - `GET /api/tasks` - List the caller's tasks, newest first
//! - `GET /api/tasks/:id` - Fetch one task
//! - `PUT /api/tasks/:id` - Partially update a task
//! - `DELETE /api/tasks/:id` - Delete a task
//! - `PATCH /api/tasks/:id/toggle-read` - Flip the read-state

use crate::{
    app::AppState,
    error::{validation_failed, ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use sqlx::PgPool;
use taskbook_shared::{
    auth::middleware::AuthContext,
    models::task::{CreateTask, Task, UpdateTask},
};
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Title, required and non-empty
    #[validate(length(min = 1, message = "task_title is required"))]
    pub task_title: String,

    /// Optional description
    pub task_description: Option<String>,

    /// Initial read-state, defaults to false when omitted
    pub is_read: Option<bool>,
}

/// Update task request
///
/// Every field optional; omitted fields keep their prior value. There is no
/// way to reassign the owner through this request.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub task_title: Option<String>,
    pub task_description: Option<String>,
    pub is_read: Option<bool>,
}

/// Fetches a task and enforces the ownership rule
///
/// 404 when absent, 403 when present but not owned by `caller`. An unowned
/// task is forbidden to every caller.
async fn fetch_owned_task(db: &PgPool, id: i64, caller: i64) -> ApiResult<Task> {
    let task = Task::find_by_id(db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    if task.user_id != Some(caller) {
        return Err(ApiError::Forbidden("Forbidden".to_string()));
    }

    Ok(task)
}

/// Create a task for the current user
///
/// # Errors
///
/// - `400 Bad Request`: missing or empty `task_title`
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate().map_err(validation_failed)?;

    let task = Task::create(
        &state.db,
        CreateTask {
            task_title: req.task_title,
            task_description: req.task_description,
            is_read: req.is_read.unwrap_or(false),
            user_id: Some(auth.user_id),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// List the caller's tasks, descending id (most recent first)
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = Task::list_by_user(&state.db, auth.user_id).await?;

    Ok(Json(tasks))
}

/// Fetch a single task
///
/// # Errors
///
/// - `404 Not Found`: no such task
/// - `403 Forbidden`: task exists but belongs to another user
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task = fetch_owned_task(&state.db, id, auth.user_id).await?;

    Ok(Json(task))
}

/// Partially update a task
///
/// Unspecified fields retain their prior value; the owner field is never
/// reassigned. If the row vanishes between the ownership check and the
/// update (a concurrent delete), the result is 404.
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    fetch_owned_task(&state.db, id, auth.user_id).await?;

    let updated = Task::update(
        &state.db,
        id,
        UpdateTask {
            task_title: req.task_title,
            task_description: req.task_description,
            is_read: req.is_read,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(updated))
}

/// Delete a task
///
/// # Errors
///
/// - `404 Not Found`: no such task, including one deleted by a racing call
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    fetch_owned_task(&state.db, id, auth.user_id).await?;

    let deleted = Task::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Flip the task's read-state and return the updated record
pub async fn toggle_task_read(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Task>> {
    fetch_owned_task(&state.db, id, auth.user_id).await?;

    let updated = Task::toggle_read(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(updated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_requires_title() {
        let req = CreateTaskRequest {
            task_title: "".to_string(),
            task_description: None,
            is_read: None,
        };

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("task_title"));
    }

    #[test]
    fn test_create_request_accepts_minimal_payload() {
        let req: CreateTaskRequest =
            serde_json::from_str(r#"{"task_title": "Buy milk"}"#).unwrap();

        assert!(req.validate().is_ok());
        assert!(req.task_description.is_none());
        assert!(req.is_read.is_none());
    }

    #[test]
    fn test_update_request_all_fields_optional() {
        let req: UpdateTaskRequest = serde_json::from_str("{}").unwrap();

        assert!(req.task_title.is_none());
        assert!(req.task_description.is_none());
        assert!(req.is_read.is_none());
    }
}
