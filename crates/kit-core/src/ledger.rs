//! Sync ledger: the snapshot of what sync last wrote
//!
//! The ledger maps each managed relative path to the checksum of the
//! content last written into the consumer repo. Conflict detection
//! compares the current target file against this snapshot: a target that
//! still matches the ledger carries no local edit and is safe to
//! overwrite. The ledger is advisory state; deleting it degrades
//! conflict detection to a direct source-vs-target comparison.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::STATE_DIR;

/// Ledger file name inside the state directory
const LEDGER_FILE: &str = "ledger.toml";

/// Checksums of the content last written by sync, keyed by relative path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncLedger {
    /// Format version for forward compatibility
    version: String,
    #[serde(default)]
    files: BTreeMap<String, String>,
}

impl Default for SyncLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncLedger {
    pub fn new() -> Self {
        Self {
            version: "1.0".to_string(),
            files: BTreeMap::new(),
        }
    }

    /// Path of the ledger file inside `target_root`.
    pub fn path_in(target_root: &Path) -> PathBuf {
        target_root.join(STATE_DIR).join(LEDGER_FILE)
    }

    /// Load the ledger from a consumer repo, or start empty if none exists.
    ///
    /// # Errors
    ///
    /// An existing ledger that cannot be read or parsed is an error: a
    /// corrupt snapshot must not silently disable conflict detection.
    pub fn load_or_default(target_root: &Path) -> Result<Self> {
        let path = Self::path_in(target_root);
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save the ledger atomically (write to temp, then rename).
    ///
    /// Creates the state directory if needed. No file locking: exclusive
    /// access for the duration of a run is an operating constraint of the
    /// tool, not something it enforces.
    pub fn save(&self, target_root: &Path) -> Result<()> {
        let path = Self::path_in(target_root);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        let temp_path = path.with_extension("toml.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    /// The recorded checksum for a path, if sync has written it before.
    pub fn checksum(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Record the checksum of content just written (or verified identical).
    pub fn record(&mut self, path: &str, checksum: String) {
        self.files.insert(path.to_string(), checksum);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
