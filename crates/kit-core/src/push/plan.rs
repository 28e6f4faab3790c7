//! Push plan types
//!
//! The plan is the complete audit record of the filter pipeline: every
//! candidate path ends up either in `entries` with the reason it was
//! retained or in `dropped` with the stage that removed it.

use serde::{Deserialize, Serialize};

use crate::sync::FileError;

/// Why a surviving path is part of the contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InclusionReason {
    /// Classified distributable by the manifest
    Distributable,
    /// Matched an `--include` pattern
    IncludePattern,
}

impl std::fmt::Display for InclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Distributable => write!(f, "distributable"),
            Self::IncludePattern => write!(f, "include pattern"),
        }
    }
}

/// How a surviving path differs from the upstream reference tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeKind {
    /// No upstream counterpart exists
    Added,
    /// Upstream counterpart differs byte-wise
    Modified,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Modified => write!(f, "modified"),
        }
    }
}

/// A path that survived all four pipeline stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushEntry {
    pub path: String,
    pub reason: InclusionReason,
    pub change: ChangeKind,
}

/// The pipeline stage that removed a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DropReason {
    /// Internal classification, not resurrected by an include pattern
    Internal,
    /// Init-only files never go upstream, even when explicitly included
    InitOnly,
    /// Matched an `--exclude` pattern
    Excluded,
    /// Matched the consumer repo's own ignore rules
    Ignored,
    /// Byte-identical to the upstream counterpart
    Unchanged,
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Internal => write!(f, "internal"),
            Self::InitOnly => write!(f, "init-only"),
            Self::Excluded => write!(f, "excluded"),
            Self::Ignored => write!(f, "ignored"),
            Self::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// A candidate removed by the pipeline, with the stage that removed it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroppedFile {
    pub path: String,
    pub reason: DropReason,
}

/// The computed contribution set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushPlan {
    /// Surviving paths, in enumeration order
    pub entries: Vec<PushEntry>,
    /// Every removed candidate with its reason
    pub dropped: Vec<DroppedFile>,
    /// Candidates that could not be read or compared
    pub errors: Vec<FileError>,
}

impl PushPlan {
    /// Nothing survived the pipeline.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The surviving relative paths, in order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }
}
