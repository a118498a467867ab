//! User handlers

use crate::error::ApiError;
use crate::extractors::JsonBody;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use gigboard_core::{GigboardError, RowId, UserStore};
use gigboard_types::{NewUser, User, UserUpdate};
use tracing::info;

/// GET /users
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.store.list_users().await?;
    Ok(Json(users))
}

/// POST /users
pub async fn create(
    State(state): State<AppState>,
    JsonBody(new_user): JsonBody<NewUser>,
) -> Result<StatusCode, ApiError> {
    let id = state.store.create_user(&new_user).await?;
    info!(user_id = id, "Created user");
    Ok(StatusCode::CREATED)
}

/// GET /users/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<RowId>,
) -> Result<Json<User>, ApiError> {
    match state.store.get_user(id).await? {
        Some(user) => Ok(Json(user)),
        None => Err(GigboardError::not_found("user", id).into()),
    }
}

/// PUT /users/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<RowId>,
    JsonBody(update): JsonBody<UserUpdate>,
) -> Result<StatusCode, ApiError> {
    if !state.store.update_user(id, &update).await? {
        return Err(GigboardError::not_found("user", id).into());
    }
    info!(user_id = id, "Updated user");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /users/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<RowId>,
) -> Result<StatusCode, ApiError> {
    if !state.store.delete_user(id).await? {
        return Err(GigboardError::not_found("user", id).into());
    }
    info!(user_id = id, "Deleted user");
    Ok(StatusCode::NO_CONTENT)
}
