//! Manifest descriptor loading and path classification

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::pattern::PatternList;

/// Name of the manifest descriptor file at the source root
pub const MANIFEST_FILE: &str = ".kit-manifest.json";

/// On-disk shape of the descriptor
#[derive(Debug, Deserialize)]
struct ManifestDoc {
    #[serde(default)]
    internal: Vec<String>,
    #[serde(default, alias = "initOnly")]
    init_only: Vec<String>,
}

/// The bucket a path falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Never shipped by any operation
    Internal,
    /// Shipped only on a first-time sync, never pushed upstream
    InitOnly,
    /// Shipped by both sync and push
    Distributable,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Internal => write!(f, "internal"),
            Self::InitOnly => write!(f, "init-only"),
            Self::Distributable => write!(f, "distributable"),
        }
    }
}

/// Compiled classification rules, immutable for the run.
#[derive(Debug, Clone)]
pub struct Manifest {
    internal: PatternList,
    init_only: PatternList,
}

impl Manifest {
    /// Load and compile the descriptor from `source_root`.
    ///
    /// The descriptor itself is always internal: an implicit leading entry
    /// for [`MANIFEST_FILE`] guarantees it can never be distributed, even
    /// if the file forgets to list itself.
    ///
    /// # Errors
    ///
    /// Fails if the descriptor is missing, is not valid JSON, or contains
    /// a malformed glob. No partial rule set is ever produced.
    pub fn load(source_root: &Path) -> Result<Self> {
        let path = source_root.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&path).map_err(|e| Error::Descriptor {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let doc: ManifestDoc = serde_json::from_str(&content).map_err(|e| Error::Descriptor {
            path: path.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!(
            internal = doc.internal.len(),
            init_only = doc.init_only.len(),
            "Loaded manifest descriptor"
        );

        Self::from_lists(&doc.internal, &doc.init_only)
    }

    /// Compile a manifest from in-memory pattern lists.
    pub fn from_lists(internal: &[String], init_only: &[String]) -> Result<Self> {
        let mut internal_patterns = Vec::with_capacity(internal.len() + 1);
        internal_patterns.push(MANIFEST_FILE.to_string());
        internal_patterns.extend(internal.iter().cloned());

        Ok(Self {
            internal: PatternList::parse("internal", &internal_patterns)?,
            init_only: PatternList::parse("init_only", init_only)?,
        })
    }

    /// Classify a relative path.
    ///
    /// The internal list is consulted first and wins outright; only then
    /// does the init_only list decide between InitOnly and Distributable.
    pub fn classify(&self, path: &str) -> Classification {
        if self.internal.matches(path) {
            return Classification::Internal;
        }
        if self.init_only.matches(path) {
            return Classification::InitOnly;
        }
        Classification::Distributable
    }

    pub fn is_distributable(&self, path: &str) -> bool {
        self.classify(path) == Classification::Distributable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lists(internal: &[&str], init_only: &[&str]) -> Manifest {
        let internal: Vec<String> = internal.iter().map(|s| s.to_string()).collect();
        let init_only: Vec<String> = init_only.iter().map(|s| s.to_string()).collect();
        Manifest::from_lists(&internal, &init_only).unwrap()
    }

    #[test]
    fn internal_wins_over_init_only() {
        let m = lists(&["conf/**"], &["conf/**"]);
        assert_eq!(m.classify("conf/settings.json"), Classification::Internal);
    }

    #[test]
    fn unmatched_paths_are_distributable() {
        let m = lists(&["scripts/**"], &[]);
        assert_eq!(m.classify("flows/deploy.yaml"), Classification::Distributable);
    }

    #[test]
    fn descriptor_file_is_always_internal() {
        let m = lists(&[], &[]);
        assert_eq!(m.classify(MANIFEST_FILE), Classification::Internal);
    }

    #[test]
    fn descriptor_file_internal_even_when_init_only_covers_it() {
        let m = lists(&[], &["**"]);
        assert_eq!(m.classify(MANIFEST_FILE), Classification::Internal);
    }

    #[test]
    fn load_missing_descriptor_is_descriptor_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Manifest::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Descriptor { .. }));
    }

    #[test]
    fn load_parses_json_lists() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"internal": ["scripts/**"], "init_only": [".kit-settings.json"]}"#,
        )
        .unwrap();

        let m = Manifest::load(dir.path()).unwrap();
        assert_eq!(m.classify("scripts/release.sh"), Classification::Internal);
        assert_eq!(m.classify(".kit-settings.json"), Classification::InitOnly);
        assert_eq!(m.classify("flows/ci.yaml"), Classification::Distributable);
    }

    #[test]
    fn load_accepts_camel_case_alias() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"internal": [], "initOnly": ["local/**"]}"#,
        )
        .unwrap();

        let m = Manifest::load(dir.path()).unwrap();
        assert_eq!(m.classify("local/notes.md"), Classification::InitOnly);
    }

    #[test]
    fn load_rejects_malformed_glob_with_position() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"internal": ["ok/**", "broken["]}"#,
        )
        .unwrap();

        let err = Manifest::load(dir.path()).unwrap_err();
        match err {
            // Index 2: the implicit descriptor entry occupies slot 0.
            Error::InvalidPattern { list, index, .. } => {
                assert_eq!(list, "internal");
                assert_eq!(index, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
