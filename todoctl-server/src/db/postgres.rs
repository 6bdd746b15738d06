//! PostgreSQL-backed todo store
//!
//! - probe: fresh connection + `SELECT 1`, closed afterwards (no pool retry)
//! - insert: `INSERT ... RETURNING id`
//! - delete: reports affected rows, the handler decides what 0 means

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{Connection, PgPool};

use super::{pool, StoreError, TodoStore};
use crate::config::DatabaseConfig;
use crate::models::{ListOrder, TaskText, TodoRow};

const CREATE_TODOS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS todos (
        id BIGSERIAL PRIMARY KEY,
        task TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        completed BOOLEAN NOT NULL DEFAULT FALSE
    )
"#;

const INSERT_TODO: &str = "INSERT INTO todos (task, created_at) VALUES ($1, $2) RETURNING id";

const SELECT_NEWEST_FIRST: &str = "SELECT id, task FROM todos ORDER BY created_at DESC, id DESC";

const SELECT_INSERTION_ORDER: &str = "SELECT id, task FROM todos ORDER BY id ASC";

const DELETE_TODO: &str = "DELETE FROM todos WHERE id = $1";

/// Todo store over a bounded PgPool
#[derive(Clone)]
pub struct PgTodoStore {
    pool: PgPool,
    connect_options: PgConnectOptions,
    query_timeout: Duration,
}

impl PgTodoStore {
    /// Build the store and its (lazy) pool. Must run inside a Tokio runtime.
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            pool: pool::create_pool(config),
            connect_options: pool::connect_options(config),
            query_timeout: config.query_timeout,
        }
    }

    /// Run a store call under the per-call deadline.
    async fn with_deadline<T, F>(&self, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        match tokio::time::timeout(self.query_timeout, call).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => Err(StoreError::Timeout(self.query_timeout)),
        }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn probe(&self) -> Result<(), StoreError> {
        self.with_deadline(async {
            let mut conn = PgConnection::connect_with(&self.connect_options).await?;
            sqlx::query("SELECT 1").execute(&mut conn).await?;
            conn.close().await
        })
        .await
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.with_deadline(sqlx::query(CREATE_TODOS_TABLE).execute(&self.pool))
            .await?;
        Ok(())
    }

    async fn insert(&self, task: &TaskText, created_at: DateTime<Utc>) -> Result<i64, StoreError> {
        self.with_deadline(
            sqlx::query_scalar::<_, i64>(INSERT_TODO)
                .bind(task.as_str())
                .bind(created_at)
                .fetch_one(&self.pool),
        )
        .await
    }

    async fn select_all(&self, order: ListOrder) -> Result<Vec<TodoRow>, StoreError> {
        let sql = match order {
            ListOrder::NewestFirst => SELECT_NEWEST_FIRST,
            ListOrder::Insertion => SELECT_INSERTION_ORDER,
        };
        self.with_deadline(sqlx::query_as::<_, TodoRow>(sql).fetch_all(&self.pool))
            .await
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, StoreError> {
        let result = self
            .with_deadline(sqlx::query(DELETE_TODO).bind(id).execute(&self.pool))
            .await?;
        Ok(result.rows_affected())
    }
}

/// Connection settings for the ignored integration tests, taken from the
/// same `DB_*` variables the CLI reads.
#[cfg(test)]
pub(crate) fn test_config() -> DatabaseConfig {
    let defaults = DatabaseConfig::default();
    let var = |key: &str, fallback: &str| std::env::var(key).unwrap_or_else(|_| fallback.to_string());
    DatabaseConfig {
        host: var("DB_HOST", &defaults.host),
        port: var("DB_PORT", "5432").parse().expect("DB_PORT must be a port number"),
        user: var("DB_USER", &defaults.user),
        password: var("DB_PASSWORD", &defaults.password),
        name: var("DB_NAME", &defaults.name),
        ..defaults
    }
}
