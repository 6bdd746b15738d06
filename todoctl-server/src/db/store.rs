//! Data-access seam
//!
//! Handlers and the startup sequencer only see this trait, so tests can run
//! them against [`MemoryStore`](super::MemoryStore).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::StoreError;
use crate::models::{ListOrder, TaskText, TodoRow};

#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// Side-effect-free connectivity check. One attempt, no retries.
    async fn probe(&self) -> Result<(), StoreError>;

    /// Create the `todos` table if it does not exist.
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    /// Insert a todo and return its store-assigned id.
    async fn insert(&self, task: &TaskText, created_at: DateTime<Utc>) -> Result<i64, StoreError>;

    async fn select_all(&self, order: ListOrder) -> Result<Vec<TodoRow>, StoreError>;

    /// Delete by id, returning the affected-row count (0 or 1).
    async fn delete_by_id(&self, id: i64) -> Result<u64, StoreError>;
}
