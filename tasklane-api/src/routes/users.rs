/// User management endpoints
///
/// This module provides CRUD endpoints for user accounts.
///
/// # Endpoints
///
/// - `POST /users` - Create user (409 if email is taken)
/// - `GET /users` - List users
/// - `GET /users/:id` - Get user
/// - `PATCH /users/:id` - Partial update (name and/or email)
/// - `DELETE /users/:id` - Delete user (physical; does not cascade to tasks)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tasklane_shared::models::user::{CreateUser, UpdateUser, User};
use validator::Validate;

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Display name
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,

    /// Email address, unique across all users
    #[validate(length(min = 1, message = "Email must not be empty"))]
    pub email: String,
}

/// Update user request
///
/// Only supplied fields change; omitted fields keep their prior values.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New display name
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,

    /// New email address (uniqueness is not re-checked here)
    #[validate(length(min = 1, message = "Email must not be empty"))]
    pub email: Option<String>,
}

/// Create user
///
/// Checks the email is not already registered before inserting.
///
/// # Errors
///
/// - 409 Conflict: email already registered
/// - 422 Unprocessable Entity: validation errors
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    request.validate()?;

    // Email is unique per user; check before insert
    if User::find_by_email(&state.db, &request.email)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(format!(
            "{} is already registered",
            request.email
        )));
    }

    let user = User::create(
        &state.db,
        CreateUser {
            name: request.name,
            email: request.email,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, email = %user.email, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// List all users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = User::list(&state.db).await?;
    Ok(Json(users))
}

/// Get a user by id
///
/// # Errors
///
/// - 404 Not Found: no user with that id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<User>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No user with id : {}", id)))?;

    Ok(Json(user))
}

/// Partially update a user
///
/// # Errors
///
/// - 404 Not Found: no user with that id
/// - 422 Unprocessable Entity: validation errors
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    request.validate()?;

    let user = User::update(
        &state.db,
        id,
        UpdateUser {
            name: request.name,
            email: request.email,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("No user with id : {}", id)))?;

    tracing::info!(user_id = user.id, "User updated");

    Ok(Json(user))
}

/// Delete a user
///
/// This is a physical delete. Tasks referencing the user are not cascaded
/// and keep their now-stale reference.
///
/// # Errors
///
/// - 404 Not Found: no user with that id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let deleted = User::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound(format!("No user with id : {}", id)));
    }

    tracing::info!(user_id = id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
