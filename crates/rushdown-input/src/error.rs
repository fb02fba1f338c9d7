//! Error types for rushdown-input

use thiserror::Error;

/// Input history error type
#[derive(Debug, Error)]
pub enum Error {
    /// Snapshot read/write failed
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot carried a cursor outside the ring
    #[error("Corrupt snapshot: cursor {0} out of range")]
    CorruptCursor(i32),
}

/// Result type for input history operations
pub type Result<T> = std::result::Result<T, Error>;
