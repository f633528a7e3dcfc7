//! Common error types for CareDesk

use thiserror::Error;

/// Common result type for CareDesk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across CareDesk crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Forms API fetch failure (terminal for the render cycle)
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// CSV serialization error
    #[error("Export error: {0}")]
    Export(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
