//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits and a bounded checkout
//! wait. Connect options are assembled field by field, never from a
//! formatted URL.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Build connect options from configuration.
pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name)
}

/// Create a PostgreSQL connection pool.
///
/// The pool connects lazily: no connection is opened until the first
/// checkout, so this never fails and never blocks. Reachability is the
/// startup sequencer's job.
///
/// Must be called from within a Tokio runtime.
pub fn create_pool(config: &DatabaseConfig) -> PgPool {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy_with(connect_options(config))
}
