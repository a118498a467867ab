//! Order handlers

use super::ensure_user_exists;
use crate::error::ApiError;
use crate::extractors::JsonBody;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use gigboard_core::{GigboardError, OrderStore, RowId};
use gigboard_types::{NewOrder, Order, OrderUpdate};
use tracing::info;

/// GET /orders
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state.store.list_orders().await?;
    Ok(Json(orders))
}

/// POST /orders
pub async fn create(
    State(state): State<AppState>,
    JsonBody(new_order): JsonBody<NewOrder>,
) -> Result<StatusCode, ApiError> {
    ensure_user_exists(&state, "customer_id", new_order.customer_id).await?;
    ensure_user_exists(&state, "executor_id", new_order.executor_id).await?;

    let id = state.store.create_order(&new_order).await?;
    info!(order_id = id, "Created order");
    Ok(StatusCode::CREATED)
}

/// GET /orders/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<RowId>,
) -> Result<Json<Order>, ApiError> {
    match state.store.get_order(id).await? {
        Some(order) => Ok(Json(order)),
        None => Err(GigboardError::not_found("order", id).into()),
    }
}

/// PUT /orders/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<RowId>,
    JsonBody(update): JsonBody<OrderUpdate>,
) -> Result<StatusCode, ApiError> {
    // A missing target answers 404 before any reference is looked at
    if state.check_references && state.store.get_order(id).await?.is_none() {
        return Err(GigboardError::not_found("order", id).into());
    }
    ensure_user_exists(&state, "customer_id", update.customer_id).await?;
    ensure_user_exists(&state, "executor_id", update.executor_id).await?;

    if !state.store.update_order(id, &update).await? {
        return Err(GigboardError::not_found("order", id).into());
    }
    info!(order_id = id, "Updated order");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /orders/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<RowId>,
) -> Result<StatusCode, ApiError> {
    if !state.store.delete_order(id).await? {
        return Err(GigboardError::not_found("order", id).into());
    }
    info!(order_id = id, "Deleted order");
    Ok(StatusCode::NO_CONTENT)
}
