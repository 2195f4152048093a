//! Error types and error handling for the application
//!
//! This module defines the HTTP-facing error type. Every variant maps to a
//! status code and renders as `{"error": ..., "status": ...}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::storage::StorageError;

/// Application-level error types
///
/// Each variant implements automatic conversion to HTTP responses via `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    /// No generation task is registered under the given ID
    #[error("Task not found")]
    TaskNotFound(String),

    /// Requested image is not on disk (or the name was rejected)
    #[error("Image not found")]
    ImageNotFound(String),

    /// The `state` form field did not contain valid JSON
    #[error("Invalid state JSON")]
    InvalidStateJson,

    /// Request body or form is missing data or malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Audio transcription failed upstream
    #[error("Transcription failed: {0}")]
    Transcription(String),

    /// Image storage error
    #[error("Storage error: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(name) | StorageError::InvalidName(name) => {
                AppError::ImageNotFound(name)
            }
            other => AppError::Storage(other),
        }
    }
}

impl AppError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::TaskNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ImageNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidStateJson => StatusCode::BAD_REQUEST,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Transcription(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
