//! API error types with IntoResponse
//!
//! Errors become plain-text responses. Storage failures are logged with
//! their source; the handler decides what text the client sees.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Path input failed validation (400)
    Validation(ValidationError),

    /// Request body is not a book (400)
    MalformedBody,

    /// No matching row (404, empty body)
    NotFound { resource: &'static str, id: String },

    /// Storage failed (500, logged)
    Storage { message: String, source: DbError },
}

impl ApiError {
    /// Storage failure reported to the client as `message`.
    pub fn storage(message: impl Into<String>, source: DbError) -> Self {
        Self::Storage {
            message: message.into(),
            source,
        }
    }

    /// Map a point lookup failure, keeping NotFound distinct.
    pub fn lookup(message: impl Into<String>, source: DbError) -> Self {
        match source {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            other => Self::storage(message, other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, format!("{}\n", e)).into_response(),
            Self::MalformedBody => {
                (StatusCode::BAD_REQUEST, "body malformed\n").into_response()
            }
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, %id, "not found");
                StatusCode::NOT_FOUND.into_response()
            }
            Self::Storage { message, source } => {
                tracing::error!(error = %source, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{}\n", message)).into_response()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
