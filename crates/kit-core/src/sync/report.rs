//! Sync report types
//!
//! Every path the engine touches, or deliberately does not touch, ends
//! up in exactly one of these buckets with its reason. A silently dropped
//! file is a defect.

use serde::{Deserialize, Serialize};

use crate::backup::BackupEntry;

/// Why a source file was not written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// Matched an internal pattern; never shipped
    Internal,
    /// Init-only file and this is not an `--init` run
    InitOnly,
    /// Target already has identical content
    UpToDate,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Internal => write!(f, "internal"),
            Self::InitOnly => write!(f, "init-only"),
            Self::UpToDate => write!(f, "up-to-date"),
        }
    }
}

/// A source file excluded from the write set, with its reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: SkipReason,
}

/// How a detected conflict was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictResolution {
    /// Overwritten with the incoming content (after backup)
    Replaced,
    /// Local content left untouched
    KeptLocal,
}

impl std::fmt::Display for ConflictResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Replaced => write!(f, "replaced"),
            Self::KeptLocal => write!(f, "kept local"),
        }
    }
}

/// A target file whose content diverged from the last-synced snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub path: String,
    pub local_checksum: String,
    pub incoming_checksum: String,
    pub resolution: ConflictResolution,
}

/// A per-file I/O failure. Recorded, never fatal for the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileError {
    pub path: String,
    pub message: String,
}

/// Outcome of a sync run. Always reflects partial completion: a file's
/// failure leaves its record in `errors` while the rest of the batch
/// proceeds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncReport {
    /// Relative paths written (including conflict overwrites)
    pub written: Vec<String>,
    /// Files excluded from the write set, with reasons
    pub skipped: Vec<SkippedFile>,
    /// Local-edit conflicts, with how each was resolved
    pub conflicts: Vec<ConflictRecord>,
    /// Pre-overwrite copies taken during this run
    pub backups: Vec<BackupEntry>,
    /// Per-file failures
    pub errors: Vec<FileError>,
}

impl SyncReport {
    /// No conflicts and no per-file failures.
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty() && self.errors.is_empty()
    }

    /// Conflicts left unresolved (local content kept).
    pub fn kept_local(&self) -> usize {
        self.conflicts
            .iter()
            .filter(|c| c.resolution == ConflictResolution::KeptLocal)
            .count()
    }
}
