/// Task management endpoints
///
/// This module provides CRUD endpoints for tasks plus the status lifecycle
/// and the derived days-elapsed computation.
///
/// # Endpoints
///
/// - `POST /tasks` - Create task (404 if the supplied user_id is unknown)
/// - `GET /tasks` - List tasks
/// - `GET /tasks/:id` - Get task
/// - `PATCH /tasks/:id` - Partial update (title/description only)
/// - `DELETE /tasks/:id` - Soft delete: status flips to `deleted`, row kept
/// - `PATCH /tasks/:id/status` - Set any of the four status values
/// - `GET /tasks/status/:status` - Filter tasks by exact status
/// - `GET /tasks/:id/days-elapsed` - Whole days since creation, rounded

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tasklane_shared::models::task::{CreateTask, Task, TaskStatus, UpdateTask};
use tasklane_shared::models::user::User;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    /// Task description
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: String,

    /// Optional owning user; must exist at creation time
    pub user_id: Option<i64>,
}

/// Update task request
///
/// Status is not settable through this path; use `PATCH /tasks/:id/status`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,

    /// New description
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,
}

/// Change status request
///
/// The status arrives as a plain string and is parsed at this boundary so
/// an out-of-set value is rejected before the store is touched.
#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    /// One of: pending, in_progress, completed, deleted
    pub status: String,
}

/// Days elapsed response
#[derive(Debug, Serialize)]
pub struct DaysElapsedResponse {
    /// Task ID
    pub task_id: i64,

    /// Whole days between creation and now, rounded to nearest
    pub days_elapsed: i64,
}

/// Shared task lookup
///
/// Update, remove, change-status and days-elapsed all resolve the task
/// through this and fail with the same message when the id is absent.
async fn find_task(state: &AppState, id: i64) -> ApiResult<Task> {
    Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No task with id : {}", id)))
}

/// Create task
///
/// New tasks always start as `pending`. When `user_id` is supplied it is
/// resolved against the user store first; if it does not exist the task is
/// not created.
///
/// # Errors
///
/// - 404 Not Found: supplied user_id does not exist
/// - 422 Unprocessable Entity: validation errors
pub async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    request.validate()?;

    // Resolve the user reference before writing anything
    if let Some(user_id) = request.user_id {
        User::find_by_id(&state.db, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("User with ID {} not found", user_id)))?;
    }

    let task = Task::create(
        &state.db,
        CreateTask {
            title: request.title,
            description: request.description,
            user_id: request.user_id,
        },
    )
    .await?;

    tracing::info!(
        task_id = task.id,
        user_id = ?task.user_id,
        "Task created"
    );

    Ok((StatusCode::CREATED, Json(task)))
}

/// List all tasks, no filtering
///
/// Soft-deleted tasks are included.
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = Task::list(&state.db).await?;
    Ok(Json(tasks))
}

/// Get a task by id
///
/// # Errors
///
/// - 404 Not Found: no task with that id
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task = find_task(&state, id).await?;
    Ok(Json(task))
}

/// Partially update a task's title and/or description
///
/// # Errors
///
/// - 404 Not Found: no task with that id
/// - 422 Unprocessable Entity: validation errors
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    request.validate()?;

    let task = Task::update(
        &state.db,
        id,
        UpdateTask {
            title: request.title,
            description: request.description,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("No task with id : {}", id)))?;

    tracing::info!(task_id = task.id, "Task updated");

    Ok(Json(task))
}

/// Soft-delete a task
///
/// Sets status to `deleted` and keeps the row; every other field is
/// preserved. Deleting an already-deleted task is allowed.
///
/// # Errors
///
/// - 404 Not Found: no task with that id
pub async fn remove_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task = Task::remove(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No task with id : {}", id)))?;

    tracing::info!(task_id = task.id, "Task soft-deleted");

    Ok(Json(task))
}

/// Set a task's status to any of the four enumerated values
///
/// No transition restriction: a `deleted` task can go back to `pending`.
///
/// # Errors
///
/// - 400 Bad Request: status is not one of the four values
/// - 404 Not Found: no task with that id
pub async fn change_task_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<ChangeStatusRequest>,
) -> ApiResult<Json<Task>> {
    let status: TaskStatus = request.status.parse()?;

    let task = Task::change_status(&state.db, id, status)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No task with id : {}", id)))?;

    tracing::info!(task_id = task.id, status = %task.status, "Task status changed");

    Ok(Json(task))
}

/// List tasks whose status exactly equals the given value
///
/// # Errors
///
/// - 400 Bad Request: status is not one of the four values
pub async fn find_tasks_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> ApiResult<Json<Vec<Task>>> {
    let status: TaskStatus = status.parse()?;

    let tasks = Task::find_by_status(&state.db, status).await?;

    Ok(Json(tasks))
}

/// Whole days elapsed since the task was created, rounded to nearest
///
/// # Errors
///
/// - 404 Not Found: no task with that id
pub async fn get_days_elapsed(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DaysElapsedResponse>> {
    let task = find_task(&state, id).await?;

    Ok(Json(DaysElapsedResponse {
        task_id: task.id,
        days_elapsed: task.days_elapsed(Utc::now()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_request_validation() {
        let valid = CreateTaskRequest {
            title: "T1".to_string(),
            description: "D1".to_string(),
            user_id: None,
        };
        assert!(valid.validate().is_ok());

        let empty_title = CreateTaskRequest {
            title: "".to_string(),
            description: "D1".to_string(),
            user_id: None,
        };
        assert!(empty_title.validate().is_err());

        let empty_description = CreateTaskRequest {
            title: "T1".to_string(),
            description: "".to_string(),
            user_id: Some(1),
        };
        assert!(empty_description.validate().is_err());
    }

    #[test]
    fn test_update_task_request_validation() {
        let empty = UpdateTaskRequest::default();
        assert!(empty.validate().is_ok());

        let blank_title = UpdateTaskRequest {
            title: Some("".to_string()),
            description: None,
        };
        assert!(blank_title.validate().is_err());
    }

    #[test]
    fn test_days_elapsed_response_serialization() {
        let response = DaysElapsedResponse {
            task_id: 1,
            days_elapsed: 6,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"task_id\":1"));
        assert!(json.contains("\"days_elapsed\":6"));
    }
}
