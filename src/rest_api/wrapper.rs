//! # Request Wrapper
//!
//! Cross-cutting handling applied around every word route: the
//! destructive-endpoint gate and the panic boundary.

use std::any::Any;

use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use super::errors::{ApiError, ErrorResponse};
use super::state::FeatureFlags;

/// Methods that can mutate stored words
pub fn is_destructive(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::DELETE)
}

/// Refuse destructive requests with 403 unless the flag is on.
/// A refused request never reaches its handler.
pub async fn destructive_gate(
    State(flags): State<FeatureFlags>,
    request: Request,
    next: Next,
) -> Response {
    if is_destructive(request.method()) && !flags.destructive_endpoints_enabled {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "destructive endpoint disabled"
        );
        return ApiError::DestructiveDisabled.into_response();
    }

    next.run(request).await
}

/// Response for a handler that panicked
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!(panic = %detail, "request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal()),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destructive_methods() {
        assert!(is_destructive(&Method::POST));
        assert!(is_destructive(&Method::PUT));
        assert!(is_destructive(&Method::DELETE));
        assert!(!is_destructive(&Method::GET));
        assert!(!is_destructive(&Method::OPTIONS));
    }

    #[test]
    fn test_panic_response_is_generic_500() {
        let response = panic_response(Box::new("index out of bounds".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
