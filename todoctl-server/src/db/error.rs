//! Store error type

use std::time::Duration;

/// Failure talking to the store.
///
/// Messages carry driver detail for logs; HTTP responses only ever expose
/// [`StoreError::category`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Connection could not be established or checked out
    #[error("database unavailable: {0}")]
    Unavailable(String),

    /// Call exceeded its deadline
    #[error("database call timed out after {0:?}")]
    Timeout(Duration),

    /// Statement reached the store and failed
    #[error("database query failed: {0}")]
    Query(String),
}

impl StoreError {
    /// Coarse description safe to hand to clients.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "database unreachable",
            Self::Timeout(_) => "database call timed out",
            Self::Query(_) => "database query failed",
        }
    }

    /// True when the store could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Timeout(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::Unavailable(e.to_string()),
            other => Self::Query(other.to_string()),
        }
    }
}
