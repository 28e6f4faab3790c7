//! Pre-overwrite backups
//!
//! Every file sync is about to overwrite is first copied into a
//! timestamped directory under `.kit/backups/` in the consumer repo,
//! preserving its relative path. Backups are never restored
//! automatically; recovery is manual.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use kit_fs::NormalizedPath;
use serde::{Deserialize, Serialize};

use crate::STATE_DIR;
use crate::error::Result;

/// Subdirectory of the state directory holding backup sets
const BACKUPS_DIR: &str = "backups";

/// One file copied aside before being overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupEntry {
    /// Relative path of the file inside the consumer repo
    pub original_path: String,
    /// Absolute path of the copied bytes
    pub backup_path: PathBuf,
    pub timestamp: DateTime<Utc>,
}

/// A timestamped backup directory for one sync run.
///
/// The directory is created lazily on the first backup, so a run that
/// overwrites nothing leaves no empty directories behind.
pub struct BackupSet {
    target_root: NormalizedPath,
    dir: NormalizedPath,
    timestamp: DateTime<Utc>,
}

impl BackupSet {
    /// Prepare a backup set for `target_root`, stamped with the current
    /// UTC time.
    pub fn new(target_root: NormalizedPath) -> Self {
        let timestamp = Utc::now();
        let stamp = timestamp.format("%Y%m%d-%H%M%S").to_string();
        let dir = target_root.join(STATE_DIR).join(BACKUPS_DIR).join(&stamp);
        Self {
            target_root,
            dir,
            timestamp,
        }
    }

    /// The backup directory for this run.
    pub fn dir(&self) -> &Path {
        self.dir.as_ref()
    }

    /// Copy the current bytes of `rel_path` into the backup directory.
    ///
    /// Scoped per file: the caller records a failure here and moves on to
    /// the next file.
    pub fn back_up(&self, rel_path: &str) -> Result<BackupEntry> {
        let source = self.target_root.join(rel_path);
        let dest = self.dir.join(rel_path);

        if let Some(parent) = dest.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source.as_ref(), dest.as_ref())?;

        tracing::debug!(path = %rel_path, backup = %dest, "Backed up file before overwrite");

        Ok(BackupEntry {
            original_path: rel_path.to_string(),
            backup_path: dest.to_native(),
            timestamp: self.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn backup_set(temp: &TempDir) -> BackupSet {
        BackupSet::new(NormalizedPath::new(temp.path()))
    }

    #[test]
    fn backup_preserves_relative_structure() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("flows/deploy.yaml");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, "original").unwrap();

        let set = backup_set(&temp);
        let entry = set.back_up("flows/deploy.yaml").unwrap();

        assert_eq!(entry.original_path, "flows/deploy.yaml");
        assert!(entry.backup_path.starts_with(set.dir()));
        assert_eq!(fs::read_to_string(&entry.backup_path).unwrap(), "original");
    }

    #[test]
    fn no_directory_until_first_backup() {
        let temp = TempDir::new().unwrap();
        let set = backup_set(&temp);
        assert!(!set.dir().exists());
    }

    #[test]
    fn missing_source_is_an_error() {
        let temp = TempDir::new().unwrap();
        let set = backup_set(&temp);
        assert!(set.back_up("does/not/exist.txt").is_err());
    }

    #[test]
    fn backups_live_under_the_state_directory() {
        let temp = TempDir::new().unwrap();
        let set = backup_set(&temp);
        assert!(
            set.dir()
                .starts_with(temp.path().join(STATE_DIR).join("backups"))
        );
    }
}
