//! Error types for snapshot persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for persistence operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Persistence failures.
///
/// Only *setup* problems are fatal. Read corruption is not represented here
/// at all: loads degrade to defaults instead of erroring.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The storage path exists but is not a directory.
    ///
    /// This is an unrecoverable setup failure: continuing would clobber
    /// whatever occupies the path.
    #[error("Storage path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The data directory could not be created or written.
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
