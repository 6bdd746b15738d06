//! HTTP server command
//!
//! Every flag falls back to an environment variable, and `.env` is loaded
//! before parsing, so container-style configuration works unchanged.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use todoctl_server::{DatabaseConfig, RetryPolicy, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Database host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database TCP port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database user
    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", default_value = "postgres", hide_env_values = true)]
    pub db_password: String,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = "todo_db")]
    pub db_name: String,

    /// Address to listen on
    #[arg(long, short = 'b', env = "HTTP_HOST", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// HTTP listen port
    #[arg(long, short = 'p', env = "HTTP_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Maximum pooled database connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 5,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub max_connections: u32,

    /// Seconds a request waits for a pooled connection
    #[arg(long, env = "DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 5,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub acquire_timeout_secs: u64,

    /// Deadline in seconds for each database call
    #[arg(long, env = "DB_QUERY_TIMEOUT_SECS", default_value_t = 10,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub query_timeout_secs: u64,

    /// Deadline in seconds for a whole HTTP request
    #[arg(long, env = "HTTP_REQUEST_TIMEOUT_SECS", default_value_t = 30,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub request_timeout_secs: u64,

    /// Connection attempts before giving up at startup
    #[arg(long, env = "STARTUP_MAX_ATTEMPTS", default_value_t = 10,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub startup_attempts: u32,

    /// Seconds to wait between startup attempts
    #[arg(long, env = "STARTUP_RETRY_DELAY_SECS", default_value_t = 3)]
    pub startup_delay_secs: u64,
}

impl ServeArgs {
    /// Assemble the immutable server configuration.
    pub fn into_config(self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.bind, self.port),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            database: DatabaseConfig {
                host: self.db_host,
                port: self.db_port,
                user: self.db_user,
                password: self.db_password,
                name: self.db_name,
                max_connections: self.max_connections,
                acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
                query_timeout: Duration::from_secs(self.query_timeout_secs),
            },
            startup: RetryPolicy {
                max_attempts: self.startup_attempts,
                delay: Duration::from_secs(self.startup_delay_secs),
            },
        }
    }
}

/// Run the HTTP server (blocks until shutdown)
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.into_config();
    tracing::info!(
        "Starting todoctl server v{} on {}",
        env!("CARGO_PKG_VERSION"),
        config.bind_addr
    );

    todoctl_server::run_server(&config)
        .await
        .context("Server error")?;

    Ok(())
}
