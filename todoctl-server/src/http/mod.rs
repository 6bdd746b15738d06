//! HTTP server layer
//!
//! Axum server with:
//! - Permissive CORS
//! - Request tracing and a per-request timeout
//! - Graceful shutdown
//! - JSON error responses

pub mod server;
pub mod error;
pub mod extractors;
pub mod routes;

pub use server::{build_router, run_server, serve_with_store};
pub use error::ApiError;
