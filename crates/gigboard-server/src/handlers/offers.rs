//! Offer handlers

use super::{ensure_order_exists, ensure_user_exists};
use crate::error::ApiError;
use crate::extractors::JsonBody;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use gigboard_core::{GigboardError, OfferStore, RowId};
use gigboard_types::{NewOffer, Offer, OfferUpdate};
use tracing::info;

/// GET /offers
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Offer>>, ApiError> {
    let offers = state.store.list_offers().await?;
    Ok(Json(offers))
}

/// POST /offers
pub async fn create(
    State(state): State<AppState>,
    JsonBody(new_offer): JsonBody<NewOffer>,
) -> Result<StatusCode, ApiError> {
    ensure_order_exists(&state, "order_id", new_offer.order_id).await?;
    ensure_user_exists(&state, "executor_id", new_offer.executor_id).await?;

    let id = state.store.create_offer(&new_offer).await?;
    info!(offer_id = id, "Created offer");
    Ok(StatusCode::CREATED)
}

/// GET /offers/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<RowId>,
) -> Result<Json<Offer>, ApiError> {
    match state.store.get_offer(id).await? {
        Some(offer) => Ok(Json(offer)),
        None => Err(GigboardError::not_found("offer", id).into()),
    }
}

/// PUT /offers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<RowId>,
    JsonBody(update): JsonBody<OfferUpdate>,
) -> Result<StatusCode, ApiError> {
    // A missing target answers 404 before any reference is looked at
    if state.check_references && state.store.get_offer(id).await?.is_none() {
        return Err(GigboardError::not_found("offer", id).into());
    }
    ensure_order_exists(&state, "order_id", update.order_id).await?;
    ensure_user_exists(&state, "executor_id", update.executor_id).await?;

    if !state.store.update_offer(id, &update).await? {
        return Err(GigboardError::not_found("offer", id).into());
    }
    info!(offer_id = id, "Updated offer");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /offers/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<RowId>,
) -> Result<StatusCode, ApiError> {
    if !state.store.delete_offer(id).await? {
        return Err(GigboardError::not_found("offer", id).into());
    }
    info!(offer_id = id, "Deleted offer");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::test_support::{json_body, send, test_app, test_app_with};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_empty_store_lists_no_offers() {
        let app = test_app().await;

        let (status, body) = send(&app, Method::GET, "/offers", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body), json!([]));
    }

    #[tokio::test]
    async fn test_create_update_get() {
        let app = test_app().await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/offers",
            Some(json!({"order_id": 1, "executor_id": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(
            &app,
            Method::PUT,
            "/offers/1",
            Some(json!({"order_id": 3, "executor_id": null})),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, Method::GET, "/offers/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json_body(&body),
            json!({"id": 1, "order_id": 3, "executor_id": null})
        );
    }

    #[tokio::test]
    async fn test_put_missing_field_leaves_offer_unchanged() {
        let app = test_app().await;
        send(
            &app,
            Method::POST,
            "/offers",
            Some(json!({"order_id": 1, "executor_id": 2})),
        )
        .await;

        let (status, _) = send(&app, Method::PUT, "/offers/1", Some(json!({"order_id": 5}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, body) = send(&app, Method::GET, "/offers/1", None).await;
        assert_eq!(
            json_body(&body),
            json!({"id": 1, "order_id": 1, "executor_id": 2})
        );
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let app = test_app().await;
        send(&app, Method::POST, "/offers", Some(json!({}))).await;

        let (status, _) = send(&app, Method::DELETE, "/offers/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, Method::GET, "/offers/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json_body(&body)["error"], "offer 1 not found");
    }

    #[tokio::test]
    async fn test_reference_check_rejects_unknown_order() {
        let app = test_app_with(true).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/offers",
            Some(json!({"order_id": 1, "executor_id": null})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json_body(&body)["error"],
            "`order_id` references order 1, which does not exist"
        );
    }

    #[tokio::test]
    async fn test_put_missing_offer_is_not_found_with_reference_checks() {
        let app = test_app_with(true).await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/offers/999",
            Some(json!({"order_id": 5, "executor_id": 6})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json_body(&body)["error"], "offer 999 not found");
    }

    #[tokio::test]
    async fn test_put_reference_check_keeps_offer_unchanged() {
        let app = test_app_with(true).await;
        send(
            &app,
            Method::POST,
            "/users",
            Some(json!({"first_name": "Ann", "last_name": "Lee", "email": "a@x.com"})),
        )
        .await;
        send(&app, Method::POST, "/orders", Some(json!({"customer_id": 1}))).await;
        send(&app, Method::POST, "/offers", Some(json!({"order_id": 1}))).await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/offers/1",
            Some(json!({"order_id": 1, "executor_id": 9})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json_body(&body)["error"],
            "`executor_id` references user 9, which does not exist"
        );

        let (_, body) = send(&app, Method::GET, "/offers/1", None).await;
        assert_eq!(
            json_body(&body),
            json!({"id": 1, "order_id": 1, "executor_id": null})
        );

        let (status, _) = send(
            &app,
            Method::PUT,
            "/offers/1",
            Some(json!({"order_id": 1, "executor_id": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
