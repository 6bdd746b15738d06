//! Health check endpoint
//!
//! One probe per call, never retried: the answer reflects the store right now.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub timestamp: String,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

/// GET /health
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    match state.store().probe().await {
        Ok(()) => {
            tracing::debug!("Health check passed");
            (
                StatusCode::OK,
                Json(HealthResponse {
                    status: "healthy",
                    database: "connected",
                    timestamp,
                    version: env!("CARGO_PKG_VERSION"),
                    error: None,
                }),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy",
                    database: "disconnected",
                    timestamp,
                    version: env!("CARGO_PKG_VERSION"),
                    error: Some(e.category()),
                }),
            )
        }
    }
}

/// Health routes
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
