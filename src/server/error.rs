use anyhow::anyhow;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use metrics::counter;
use std::any::Any;
use thiserror::Error;
use tracing::error;

use crate::health::HealthFailure;
use crate::logs::TOTAL_ERRORS;

/// Body returned by plain-text routes on internal failure
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Errors raised by the HTTP route handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// A failure in a plain-text route
    #[error("internal error: {0}")]
    Internal(anyhow::Error),
    /// A failure while producing the health report
    #[error("health check failed: {0}")]
    Unhealthy(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Output debugging information
        error!(error = %self, "Request handler failed");
        // Increment error metrics
        counter!(TOTAL_ERRORS).increment(1);
        // Render the failure for the route that raised it
        match self {
            ApiError::Internal(_) => internal_error_response(),
            ApiError::Unhealthy(_) => unhealthy_response(),
        }
    }
}

/// Plain-text 500 response
fn internal_error_response() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR).into_response()
}

/// JSON 500 response for the health endpoint
fn unhealthy_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(HealthFailure::default()),
    )
        .into_response()
}

/// Describe a captured panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Panic handler for plain-text routes
pub fn handle_text_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::Internal(anyhow!("handler panicked: {}", panic_message(payload.as_ref())))
        .into_response()
}

/// Panic handler for the health route
pub fn handle_health_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::Unhealthy(anyhow!("handler panicked: {}", panic_message(payload.as_ref())))
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_internal_error_renders_text() {
        let response = ApiError::Internal(anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], INTERNAL_SERVER_ERROR.as_bytes());
    }

    #[tokio::test]
    async fn test_unhealthy_error_renders_json() {
        let response = ApiError::Unhealthy(anyhow!("clock")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let failure: HealthFailure = serde_json::from_slice(&body).unwrap();
        assert_eq!(failure, HealthFailure::default());
    }

    #[test]
    fn test_panic_message() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let borrowed: Box<dyn Any + Send> = Box::new("borrowed");
        let other: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(owned.as_ref()), "owned");
        assert_eq!(panic_message(borrowed.as_ref()), "borrowed");
        assert_eq!(panic_message(other.as_ref()), "unknown panic payload");
    }

    #[test]
    fn test_error_display() {
        let error = ApiError::Unhealthy(anyhow!("clock went backwards"));
        assert_eq!(error.to_string(), "health check failed: clock went backwards");
    }
}
