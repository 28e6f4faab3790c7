//! Error types for kit-manifest

use std::path::PathBuf;

/// Result type for kit-manifest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading rules or classifying paths
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The descriptor file is missing or does not parse
    #[error("Manifest descriptor error at {path}: {message}")]
    Descriptor { path: PathBuf, message: String },

    /// A glob entry failed to compile; reported with its list and position
    /// so the offending line can be fixed directly
    #[error("Invalid pattern {pattern:?} at {list}[{index}]: {message}")]
    InvalidPattern {
        list: String,
        index: usize,
        pattern: String,
        message: String,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
