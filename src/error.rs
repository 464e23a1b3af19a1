//! Error types for Postboard.

use thiserror::Error;

/// Common error type for Postboard.
#[derive(Error, Debug)]
pub enum PostboardError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for Postboard operations.
pub type Result<T> = std::result::Result<T, PostboardError>;
