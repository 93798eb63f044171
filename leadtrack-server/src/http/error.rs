//! API error types with IntoResponse
//!
//! All failures collapse to an HTTP status plus a JSON `{"error": message}`
//! body: 400 for bad input and bad credentials, 401/403 for auth failures,
//! 404 for missing resources, 500 for database errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use leadtrack_core::CoreError;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Unknown user or wrong password on login (400, like the rest of
    /// the bad-input family)
    InvalidCredentials { reason: &'static str },

    /// Registration with a username that is already taken (400)
    DuplicateUsername,

    /// No bearer token supplied (401)
    MissingToken,

    /// Token failed signature or expiry validation (403)
    InvalidToken,

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Internal error (500, logged)
    Internal { message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::InvalidCredentials { reason } => (StatusCode::BAD_REQUEST, reason.to_string()),
            Self::DuplicateUsername => {
                (StatusCode::BAD_REQUEST, "user already exists".to_string())
            }
            Self::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "access denied, no token provided".to_string(),
            ),
            Self::InvalidToken => (StatusCode::FORBIDDEN, "invalid token".to_string()),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                format!("{} '{}' not found", resource, id),
            ),
            Self::Database(e) => {
                // Log the actual error, return a generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_string(),
                )
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Database(e),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::TokenInvalid => Self::InvalidToken,
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}
