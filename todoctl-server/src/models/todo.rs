//! Todo rows as returned by the list endpoint

use serde::Serialize;
use sqlx::FromRow;

/// A stored todo, as exposed to clients.
///
/// `created_at` and `completed` live in the table but are not part of the
/// client-facing shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct TodoRow {
    pub id: i64,
    pub task: String,
}

/// Ordering applied by `select_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOrder {
    /// `created_at` descending, ties broken by id descending
    #[default]
    NewestFirst,
    /// Insertion (id) order
    Insertion,
}
