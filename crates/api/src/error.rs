//! API Error Mapping

use crate::ApiResponse;
use alerting::AlertingError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use storage::StorageError;
use thiserror::Error;
use tracing::error;

/// Errors surfaced to HTTP callers.
///
/// A store failure on ingest is a loud 503, never an empty alert list: a
/// degraded cache is a different outcome than a correct zero-alert
/// decision.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("service degraded: {0}")]
    Unavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<AlertingError> for ApiError {
    fn from(err: AlertingError) -> Self {
        match err {
            AlertingError::NotFound(id) => ApiError::NotFound(format!("no open alert {id}")),
            AlertingError::Storage(e) => e.into(),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Unavailable(e) => ApiError::Unavailable(e),
            StorageError::NotFound => ApiError::NotFound("record not found".to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(%self, "request failed");
        }
        (status, Json(ApiResponse::<()>::message(self.to_string()))).into_response()
    }
}
