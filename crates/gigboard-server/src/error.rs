//! HTTP error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gigboard_core::GigboardError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Body is not parseable JSON
    #[error("Malformed JSON body: {0}")]
    MalformedBody(String),

    /// Body is JSON but does not match the field whitelist
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Domain(#[from] GigboardError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Domain(err) => match err {
                GigboardError::NotFound { .. } => StatusCode::NOT_FOUND,
                GigboardError::Conflict(_) => StatusCode::CONFLICT,
                GigboardError::Constraint(_) | GigboardError::MissingReference { .. } => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed");
            "An internal error occurred".to_string()
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::MalformedBody("eof".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidBody("missing field".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(GigboardError::not_found("user", 9)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(GigboardError::Conflict("phone".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(GigboardError::Database("disk I/O error".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_internal_errors_are_redacted() {
        let response =
            ApiError::from(GigboardError::Database("secret table layout".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "An internal error occurred");
    }
}
