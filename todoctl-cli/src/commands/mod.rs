//! Command implementations for todoctl CLI

pub mod serve;

pub use serve::run_serve;
