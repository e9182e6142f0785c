//! Error types for the FIFO transport.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for transport operations.
pub type IpcResult<T> = Result<T, IpcError>;

/// Transport failures.
#[derive(Debug, Error)]
pub enum IpcError {
    /// The endpoint path exists but is not a FIFO.
    ///
    /// Setup failure: refusing to talk through a regular file beats
    /// silently reading garbage from one.
    #[error("Path exists but is not a FIFO: {0}")]
    NotAFifo(PathBuf),

    /// A received line exceeded the configured frame limit.
    ///
    /// The stream stays usable: bytes are discarded through the next
    /// delimiter and framing resumes there.
    #[error("Incoming line exceeded the {limit}-byte frame limit")]
    FrameTooLong { limit: usize },

    /// Pipe creation, open, read or write failed.
    #[error("Pipe I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
