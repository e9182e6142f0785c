//! Error types for the branch runtime.

use thiserror::Error;

use chain_ipc::IpcError;
use chain_persist::PersistError;

/// Result type alias for branch operations.
pub type BranchResult<T> = Result<T, BranchError>;

/// Failures that terminate a branch process.
///
/// Protocol and business-rule problems never appear here - those are
/// answered on the wire. What remains is setup (FIFOs, storage path) and
/// unrecoverable I/O.
#[derive(Debug, Error)]
pub enum BranchError {
    /// Snapshot storage could not be opened or written.
    #[error(transparent)]
    Persist(#[from] PersistError),

    /// Channel endpoint setup or I/O failed.
    #[error(transparent)]
    Ipc(#[from] IpcError),
}
