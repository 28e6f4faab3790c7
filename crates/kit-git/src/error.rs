//! Error types for kit-git

/// Result type for kit-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gateway operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    /// The executable could not be launched at all
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A command ran and exited non-zero in a context that required success
    #[error("{context} failed: {stderr}")]
    CommandFailed { context: String, stderr: String },
}
