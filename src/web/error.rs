use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::db::StorageError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Request timeout: {0}")]
    RequestTimeout(String),
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Storage operation failed: {0}")]
    StorageOperationFailed(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::RequestTimeout(msg) => (StatusCode::REQUEST_TIMEOUT, msg),
            AppError::StorageUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("Storage unavailable: {msg}"),
            ),
            AppError::StorageOperationFailed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {msg}"),
            ),
        };
        (status, Json(serde_json::json!({ "error": error_message }))).into_response()
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(msg) => AppError::NotFound(msg),
            StorageError::Conflict(msg) => AppError::Conflict(msg),
            StorageError::Unavailable(msg) => {
                error!(error = %msg, "Storage unavailable while serving request.");
                AppError::StorageUnavailable(msg)
            }
            StorageError::OperationFailed(e) => {
                error!(error = %e, "Storage operation failed.");
                AppError::StorageOperationFailed(e.to_string())
            }
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}
