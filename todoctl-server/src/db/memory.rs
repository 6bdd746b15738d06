//! In-memory todo store (for testing)
//!
//! Mirrors the PostgreSQL store's semantics: ids start at 1 and are never
//! reused, deletes report affected rows. The store can be taken offline, or
//! told to fail the next N probes, to exercise unavailability paths.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{StoreError, TodoStore};
use crate::models::{ListOrder, TaskText, TodoRow};

#[derive(Debug)]
struct StoredTodo {
    id: i64,
    task: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Table {
    rows: Vec<StoredTodo>,
    last_id: i64,
    schema_ready: bool,
}

/// Thread-safe in-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Mutex<Table>,
    offline: AtomicBool,
    failing_probes: AtomicU32,
    probes: AtomicU32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle reachability. While offline every call fails with
    /// [`StoreError::Unavailable`].
    pub fn set_online(&self, online: bool) {
        self.offline.store(!online, Ordering::SeqCst);
    }

    /// Make the next `count` probes fail before the store answers.
    pub fn fail_next_probes(&self, count: u32) {
        self.failing_probes.store(count, Ordering::SeqCst);
    }

    /// Number of probes issued so far.
    pub fn probe_count(&self) -> u32 {
        self.probes.load(Ordering::SeqCst)
    }

    /// Whether `ensure_schema` has succeeded.
    pub fn schema_ready(&self) -> bool {
        self.lock().map(|t| t.schema_ready).unwrap_or(false)
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.lock().map(|t| t.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Table>, StoreError> {
        self.table
            .lock()
            .map_err(|_| StoreError::Query("memory store lock poisoned".to_string()))
    }

    fn reachable(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "connection refused (memory store offline)".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn probe(&self) -> Result<(), StoreError> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.reachable()?;

        let pending = self
            .failing_probes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if pending.is_ok() {
            return Err(StoreError::Unavailable(
                "connection refused (simulated)".to_string(),
            ));
        }
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.reachable()?;
        self.lock()?.schema_ready = true;
        Ok(())
    }

    async fn insert(&self, task: &TaskText, created_at: DateTime<Utc>) -> Result<i64, StoreError> {
        self.reachable()?;
        let mut table = self.lock()?;
        table.last_id += 1;
        let id = table.last_id;
        table.rows.push(StoredTodo {
            id,
            task: task.as_str().to_owned(),
            created_at,
        });
        Ok(id)
    }

    async fn select_all(&self, order: ListOrder) -> Result<Vec<TodoRow>, StoreError> {
        self.reachable()?;
        let table = self.lock()?;
        let mut rows: Vec<&StoredTodo> = table.rows.iter().collect();
        match order {
            ListOrder::NewestFirst => {
                rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)))
            }
            ListOrder::Insertion => rows.sort_by_key(|r| r.id),
        }
        Ok(rows
            .into_iter()
            .map(|r| TodoRow {
                id: r.id,
                task: r.task.clone(),
            })
            .collect())
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, StoreError> {
        self.reachable()?;
        let mut table = self.lock()?;
        let before = table.rows.len();
        table.rows.retain(|r| r.id != id);
        Ok((before - table.rows.len()) as u64)
    }
}
