//! Error Types
//!
//! Database, use case and HTTP error types with status code mapping.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::domain::models::backend::BackendKind;

/// Data access and connection errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Failed to {action} table {table}: {source}")]
    Schema {
        action: &'static str,
        table: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Timed out after {0:?} while connecting to the database")]
    Timeout(Duration),

    #[error("Session is bound to {actual}, not {expected}")]
    BackendMismatch {
        expected: BackendKind,
        actual: BackendKind,
    },
}

/// Use case-level errors
#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl UseCaseError {
    /// Get the HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Database(DatabaseError::Timeout(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(DatabaseError::Connection(sqlx::Error::PoolTimedOut)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Database(DatabaseError::Timeout(_)) => "DATABASE_TIMEOUT",
            Self::Database(DatabaseError::Connection(sqlx::Error::PoolTimedOut)) => "DATABASE_UNAVAILABLE",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

/// API error response for HTTP responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    UseCase(#[from] UseCaseError),
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::UseCase(err.into())
    }
}

/// Error response body structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub timestamp: String,
}

/// Error detail structure
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::UseCase(uc_error) = &self;
        tracing::error!(error = %uc_error, "Request failed");
        let (status, code) = (uc_error.status_code(), uc_error.error_code());

        // Database error text can carry connection details; keep it out of the body.
        let message = match status {
            StatusCode::SERVICE_UNAVAILABLE => "Database temporarily unavailable",
            _ => "An unexpected error occurred",
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: message.to_string(),
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(body)).into_response()
    }
}
