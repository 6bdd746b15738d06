//! Database layer - store trait, connection pool and implementations
//!
//! # Design Principles
//!
//! - One parameterized statement per call, never string-built SQL
//! - Bounded pool, connections released by RAII on every exit path
//! - Every call carries a deadline

pub mod error;
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use pool::{connect_options, create_pool};
pub use postgres::PgTodoStore;
pub use store::TodoStore;
