//! Error types for kit-core

use std::path::PathBuf;

/// Result type for kit-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sync and push operations.
///
/// Per-file read/write failures are not errors at this level; they are
/// recorded in the reports so a batch always reflects partial completion.
/// What surfaces here is fatal for the invocation: bad configuration,
/// gateway failures, strict-mode conflicts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Manifest or pattern configuration error
    #[error(transparent)]
    Manifest(#[from] kit_manifest::Error),

    /// Filesystem error from kit-fs
    #[error(transparent)]
    Fs(#[from] kit_fs::Error),

    /// Version-control gateway failure
    #[error("Gateway error: {0}")]
    Gateway(#[from] kit_git::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error (ledger)
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error (ledger)
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),

    #[error("{count} conflict(s) detected, aborting before any write")]
    ConflictsDetected { count: usize },

    #[error("Not a git repository: {path}")]
    NotARepository { path: PathBuf },

    #[error("HEAD is detached in {path}; check out a branch first")]
    DetachedHead { path: PathBuf },

    /// A push that failed after the contribution branch was created.
    /// The branch is left in place for manual recovery.
    #[error("Push failed on branch '{branch}': {message}")]
    PushFailed { branch: String, message: String },
}
