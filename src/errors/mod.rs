//! Error handling module for the offers backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and response bodies.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Messages returned to clients. Store failures never leak details.
pub mod messages {
    pub const MISSING_FIELDS: &str = "Missing required fields";
    pub const OFFER_NOT_FOUND: &str = "Offer not found";
    pub const SERVER_ERROR: &str = "Server error";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Bad request
    BadRequest(String),
    /// Database error
    Database(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message that is safe to show to API clients.
    pub fn public_message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => msg.clone(),
            AppError::Database(_) | AppError::Internal(_) => messages::SERVER_ERROR.to_string(),
        }
    }

    /// Attach the failing operation to the server log and pass the error through.
    pub fn log(self, operation: &str) -> Self {
        match &self {
            AppError::Database(msg) | AppError::Internal(msg) => {
                tracing::error!(operation, "Error {}: {}", operation, msg);
            }
            AppError::NotFound(msg) | AppError::BadRequest(msg) => {
                tracing::debug!(operation, "Rejected request: {}", msg);
            }
        }
        self
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Database(msg)
            | AppError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(format!("Database error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        AppError::BadRequest(messages::MISSING_FIELDS.to_string())
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Database("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_failures_are_not_exposed() {
        let err = AppError::Database("UNIQUE constraint failed: offers.slug".into());
        assert_eq!(err.public_message(), messages::SERVER_ERROR);
        assert!(err.to_string().contains("UNIQUE"));
    }

    #[tokio::test]
    async fn test_error_body_carries_only_message() {
        let resp = AppError::NotFound(messages::OFFER_NOT_FOUND.to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Offer not found" }));
    }
}
