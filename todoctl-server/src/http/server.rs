//! Axum server setup
//!
//! Startup order is fixed: wait for the store, then bind, then serve.
//! A store that never comes up means the socket is never opened.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::ServerConfig;
use crate::db::{PgTodoStore, TodoStore};
use crate::error::Result;
use crate::startup;
use crate::state::AppState;

/// Build the application router with all routes
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(cors);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::todos::router())
        .layer(middleware)
        .with_state(state)
}

/// Run the HTTP server against PostgreSQL.
///
/// # Example
///
/// ```ignore
/// let config = ServerConfig::default();
/// run_server(&config).await?;
/// ```
pub async fn run_server(config: &ServerConfig) -> Result<()> {
    tracing::info!(database = ?config.database, "Using PostgreSQL store");
    let store = Arc::new(PgTodoStore::new(&config.database));
    serve_with_store(store, config).await
}

/// Run the startup sequencer against `store`, then serve until shutdown.
pub async fn serve_with_store(store: Arc<dyn TodoStore>, config: &ServerConfig) -> Result<()> {
    let report = startup::wait_for_store(store.as_ref(), config.startup).await?;
    tracing::info!(
        attempts = report.attempts,
        waited = ?report.waited,
        "Database ready"
    );

    let app = build_router(AppState::new(store), config.request_timeout);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}
