//! Server configuration
//!
//! Built once at startup and handed by reference to the store and router
//! constructors. Nothing here is read from ambient globals.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

/// Connection settings for the PostgreSQL store.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Database (schema) name
    pub name: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
    /// How long a request waits to check out a pooled connection
    pub acquire_timeout: Duration,
    /// Deadline applied to every store call
    pub query_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            name: "todo_db".to_string(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
            query_timeout: Duration::from_secs(10),
        }
    }
}

// Manual impl keeps the password out of logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("query_timeout", &self.query_timeout)
            .finish()
    }
}

/// Fixed-delay retry budget for the startup probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first (minimum 1)
    pub max_attempts: u32,
    /// Sleep between consecutive attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay: Duration::from_secs(3),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:5000)
    pub bind_addr: SocketAddr,

    /// Deadline for a whole HTTP request
    pub request_timeout: Duration,

    pub database: DatabaseConfig,

    pub startup: RetryPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            request_timeout: Duration::from_secs(30),
            database: DatabaseConfig::default(),
            startup: RetryPolicy::default(),
        }
    }
}
