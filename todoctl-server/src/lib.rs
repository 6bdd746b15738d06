//! todoctl-server: todo CRUD over HTTP
//!
//! A single-table facade over PostgreSQL. Requests map one-to-one onto
//! parameterized statements; startup blocks until the store is reachable
//! and the schema exists.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod startup;
pub mod state;

pub use config::{DatabaseConfig, RetryPolicy, ServerConfig};
pub use error::{Error, Result};
pub use http::{build_router, run_server, serve_with_store};
pub use state::AppState;
