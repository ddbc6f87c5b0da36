//! Error types for zig-syntax

use thiserror::Error;

/// Result type alias for highlighting operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighting error types
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Line {line} is out of range (buffer has {line_count} lines)")]
    OutOfRange { line: usize, line_count: usize },

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Message(String),
}

impl HighlightError {
    /// Shorthand for an `InvalidInput` error
    pub fn invalid(msg: impl Into<String>) -> Self {
        HighlightError::InvalidInput(msg.into())
    }
}
