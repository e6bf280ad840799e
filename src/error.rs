//! Error types for PagedKV
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using PagedKvError
pub type Result<T> = std::result::Result<T, PagedKvError>;

/// Unified error type for PagedKV operations
#[derive(Debug, Error)]
pub enum PagedKvError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Map Errors
    // -------------------------------------------------------------------------
    #[error("Map is not initialized, run `init` first")]
    UninitializedMap,

    #[error("Page {page} ran out of storage for key {key}")]
    PageOverflow { key: i32, page: usize },

    #[error("Could not allocate {bytes} bytes for the map buffer")]
    AllocationFailure { bytes: usize },

    #[error("Key {0} is reserved")]
    ReservedKey(i32),

    #[error("Buffer access out of bounds: offset {offset}, len {len}")]
    OutOfBounds { offset: usize, len: usize },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Invalid argument for `{command}`: {reason}")]
    InvalidArgument {
        command: &'static str,
        reason: String,
    },

    #[error("Missing argument for `{command}`")]
    MissingArgument { command: &'static str },
}

impl PagedKvError {
    /// Whether the command loop can carry on after this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, PagedKvError::Io(_))
    }
}
