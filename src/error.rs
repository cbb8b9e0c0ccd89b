//! HTTP-facing error type

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::{repository::RepositoryError, timer::TimerError};

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input from the client.
    #[error("{0}")]
    BadRequest(String),
    /// Requested record does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Action not possible in the current timer state.
    #[error("{0}")]
    Conflict(String),
    /// Storage or internal failure.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TimerError> for AppError {
    fn from(err: TimerError) -> Self {
        match err {
            TimerError::InvalidInput { .. } => AppError::BadRequest(err.to_string()),
            TimerError::NotReady => AppError::Conflict(err.to_string()),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Validation(_) => AppError::BadRequest(err.to_string()),
            RepositoryError::NotFound { .. } => AppError::NotFound(err.to_string()),
            RepositoryError::Storage(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Failure body: `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let payload = Json(ErrorBody {
            error: self.to_string(),
        });

        (status, payload).into_response()
    }
}
