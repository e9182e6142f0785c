//! Error types for the head office.

use thiserror::Error;

use chain_ipc::IpcError;

/// Result type alias for head-office operations.
pub type OfficeResult<T> = Result<T, OfficeError>;

/// Head-office failures.
///
/// Everything here is a setup or dispatch problem on the office's own side;
/// a branch misbehaving shows up in its replies (or their absence), never as
/// an error variant.
#[derive(Debug, Error)]
pub enum OfficeError {
    /// The configuration is unusable.
    #[error("Invalid office configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be parsed.
    #[error("Failed to parse office configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A command was addressed to a branch the office never registered.
    #[error("Unknown branch: {0}")]
    UnknownBranch(String),

    /// A branch process could not be spawned.
    #[error("Failed to spawn branch {branch}: {source}")]
    Spawn {
        branch: String,
        #[source]
        source: std::io::Error,
    },

    /// Channel endpoint setup or dispatch failed.
    #[error(transparent)]
    Ipc(#[from] IpcError),

    /// Runtime-directory or config-file I/O failed.
    #[error("Office I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
