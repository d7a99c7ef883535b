//! Unified error handling for the server.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::editor::EditorError;

/// Application-level error type, converted to a response at the request
/// boundary. No error is retried internally.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Missing or malformed required fields.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Login failed. Deliberately carries no detail: unknown email and
    /// wrong password must be indistinguishable to the caller.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, expired, or badly signed bearer token.
    #[error("Unauthorized")]
    Unauthorized,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body, matching the shape the admin frontend expects.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => "Server error".to_string(),
            Self::InvalidCredentials => "Invalid credentials".to_string(),
            Self::Unauthorized => "Unauthorized".to_string(),
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<EditorError> for AppError {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::Validation(msg) => Self::Validation(msg),
            EditorError::NotFound(what) => Self::NotFound(what.to_string()),
            EditorError::Repository(e) => Self::Database(e),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::InvalidEmail(_) => Self::InvalidCredentials,
            AuthError::InvalidToken => Self::Unauthorized,
            AuthError::Repository(e) => Self::Database(e),
            AuthError::PasswordHash | AuthError::TokenEncoding(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("service 123".to_string());
        assert_eq!(err.to_string(), "Not found: service 123");

        let err = AppError::Validation("title is required".to_string());
        assert_eq!(err.to_string(), "Validation error: title is required");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            status_of(AppError::Validation("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_of(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_login_failures_are_uniform() {
        // Unknown email and wrong password both fold into the same
        // variant; the rendered message must be identical.
        let unknown = AppError::from(AuthError::InvalidCredentials);
        let mismatch = AppError::from(AuthError::InvalidCredentials);
        assert_eq!(unknown.to_string(), mismatch.to_string());
    }
}
