//! API error types with IntoResponse
//!
//! Errors are converted to `{"error": ...}` JSON bodies. Store failures are
//! logged in full and answered with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Todo not found (404)
    NotFound { id: String },

    /// Store unreachable or timed out (500, logged)
    StoreUnavailable(StoreError),

    /// Statement failed (500, logged)
    Internal(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(e) => {
                tracing::warn!(error = %e, "Rejected request");
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            Self::NotFound { id } => {
                tracing::warn!(id = %id, "Todo not found");
                (StatusCode::NOT_FOUND, "Todo not found".to_string())
            }
            Self::StoreUnavailable(e) => {
                tracing::error!(error = %e, "Database unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
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

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        if e.is_unavailable() {
            Self::StoreUnavailable(e)
        } else {
            Self::Internal(e)
        }
    }
}
