//! Error types for todoctl-server

use thiserror::Error;

use crate::startup::StartupError;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal server errors. Request-level failures live in
/// [`ApiError`](crate::http::ApiError).
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Startup(#[from] StartupError),
}
