//! # REST API Errors
//!
//! Error types for the REST API module and their HTTP mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for REST operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Message returned to callers when a destructive request is refused
pub const DESTRUCTIVE_DISABLED_MESSAGE: &str = "Destructive endpoints are disabled. \
     Set ENABLE_DESTRUCTIVE_ENDPOINTS=true and restart the server to allow POST, PUT and DELETE.";

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// A required field is absent or empty
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A field is present but cannot be normalized
    #[error("Invalid value for '{field}': {message}")]
    TypeValidation { field: String, message: String },

    /// Invalid query parameter
    #[error("{0}")]
    InvalidQuery(String),

    /// Request body is not valid JSON
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Update carried no recognized fields
    #[error("No valid fields provided for update")]
    EmptyUpdate,

    /// Destructive endpoints are switched off
    #[error("{}", DESTRUCTIVE_DISABLED_MESSAGE)]
    DestructiveDisabled,

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// A word with this spelling already exists
    #[error("Word '{0}' already exists")]
    Conflict(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store failure. The caller only sees a generic message.
    #[error("Internal server error")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// No word has the requested id
    pub fn word_not_found() -> Self {
        ApiError::NotFound("Word not found".to_string())
    }

    /// Shorthand for a type validation failure
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::TypeValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            ApiError::MissingField(_) => StatusCode::BAD_REQUEST,
            ApiError::TypeValidation { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::EmptyUpdate => StatusCode::BAD_REQUEST,

            // 403 Forbidden
            ApiError::DestructiveDisabled => StatusCode::FORBIDDEN,

            // 404 Not Found
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,

            // 409 Conflict
            ApiError::Conflict(_) => StatusCode::CONFLICT,

            // 500 Internal Server Error
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn internal() -> Self {
        Self {
            error: "Internal server error".to_string(),
            code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        }
    }
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store(source) = &self {
            tracing::error!(error = %source, "store operation failed");
        }

        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::MissingField("word".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::invalid("numLetters", "must be a positive integer").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::DestructiveDisabled.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::word_not_found().status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("apple".to_string()).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_store_errors_are_opaque() {
        let err = ApiError::from(StoreError::Unavailable("10.0.0.3:27017 refused".to_string()));

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse::from(&err);
        assert_eq!(body.error, "Internal server error");
        assert!(!body.error.contains("27017"));
    }

    #[test]
    fn test_missing_field_message_names_field() {
        let body = ErrorResponse::from(&ApiError::MissingField("hint".to_string()));
        assert_eq!(body.code, 400);
        assert!(body.error.contains("hint"));
    }
}
