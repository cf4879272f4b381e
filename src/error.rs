use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::InvalidTodoId;

pub const EMPTY_BODY: &str = "Todo body can't be empty";
pub const INVALID_ID: &str = "Invalid todo ID";
pub const INVALID_JSON: &str = "Invalid JSON payload";

#[derive(Debug, Error)]
pub enum AppError {
    /// Client sent something we refuse to act on.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Update or delete matched nothing. Still reported as success.
    #[error("no todo matched")]
    NotFoundIgnored,
    #[error("storage failure: {0:#}")]
    StorageFailure(#[from] anyhow::Error),
    #[error("configuration failure: {0}")]
    ConfigFailure(String),
}

impl From<InvalidTodoId> for AppError {
    fn from(_: InvalidTodoId) -> Self {
        Self::InvalidInput(INVALID_ID)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(%rejection, "rejected request payload");
        Self::InvalidInput(INVALID_JSON)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidInput(message) => {
                tracing::debug!(reason = message, "client error");
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            AppError::NotFoundIgnored => {
                (StatusCode::OK, Json(json!({ "success": true }))).into_response()
            }
            err @ (AppError::StorageFailure(_) | AppError::ConfigFailure(_)) => {
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn invalid_input_is_bad_request_with_message() {
        let (status, body) = render(AppError::InvalidInput(EMPTY_BODY)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Todo body can't be empty" }));
    }

    #[tokio::test]
    async fn invalid_id_maps_to_bad_request() {
        let err: AppError = "not-an-id".parse::<crate::models::TodoId>().unwrap_err().into();
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid todo ID" }));
    }

    #[tokio::test]
    async fn storage_failure_hides_detail() {
        let err = AppError::from(anyhow::anyhow!("connection reset by peer"));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn not_found_is_acknowledged() {
        let (status, body) = render(AppError::NotFoundIgnored).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
    }
}
