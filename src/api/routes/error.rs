//! API error handling utilities.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::storage::StorageError;

/// Errors a route handler can answer with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Resource not found")]
    NotFound,
    #[error("An If-Match header is required")]
    PreconditionRequired,
    #[error("Version mismatch: expected {expected}, current version is {current}")]
    PreconditionFailed { expected: String, current: i32 },
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::PreconditionRequired => StatusCode::PRECONDITION_REQUIRED,
            ApiError::PreconditionFailed { .. } => StatusCode::PRECONDITION_FAILED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Not found carries no body
        if status == StatusCode::NOT_FOUND {
            return status.into_response();
        }

        let body = json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { .. } => ApiError::NotFound,
            StorageError::VersionConflict {
                expected_version,
                current_version,
                ..
            } => ApiError::PreconditionFailed {
                expected: expected_version.to_string(),
                current: current_version,
            },
            StorageError::Invalid(msg) => ApiError::BadRequest(msg),
            StorageError::ConnectionError(_) | StorageError::Other(_) => {
                error!("Storage backend failed: {}", err);
                ApiError::Internal("Storage backend failed".to_string())
            }
        }
    }
}
