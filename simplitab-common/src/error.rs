//! Common error types for SimpliTab

use thiserror::Error;

/// Common result type for SimpliTab operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the SimpliTab crates
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),
}
