//! SyncEngine implementation
//!
//! Two passes: a read-only decision pass that classifies every source
//! file and detects conflicts, then an apply pass that backs up and
//! writes. Strict mode aborts between the two, so a strict failure never
//! mutates the target.

use std::fs;

use kit_fs::{NormalizedPath, compute_bytes_checksum, walk_relative};
use kit_manifest::{Classification, Manifest};

use super::report::{
    ConflictRecord, ConflictResolution, FileError, SkipReason, SkippedFile, SyncReport,
};
use crate::SKIP_DIRS;
use crate::backup::BackupSet;
use crate::error::{Error, Result};
use crate::ledger::SyncLedger;

/// Options for a sync run
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// First-time sync: init-only files are included
    pub init: bool,
    /// Resolve conflicts by overwriting (with backup) instead of keeping
    /// the local content
    pub overwrite_conflicts: bool,
    /// Abort with an error if any conflict is detected, before any write
    pub strict: bool,
    /// Compute the full report without touching the filesystem
    pub dry_run: bool,
}

/// A write the decision pass has approved.
struct PendingWrite {
    path: String,
    incoming: Vec<u8>,
    checksum: String,
    /// Target file exists and must be backed up first
    overwrite: bool,
}

/// Distributes the kit source tree into a consumer repository.
pub struct SyncEngine<'a> {
    manifest: &'a Manifest,
    source_root: NormalizedPath,
    target_root: NormalizedPath,
}

impl<'a> SyncEngine<'a> {
    pub fn new(
        manifest: &'a Manifest,
        source_root: impl Into<NormalizedPath>,
        target_root: impl Into<NormalizedPath>,
    ) -> Self {
        Self {
            manifest,
            source_root: source_root.into(),
            target_root: target_root.into(),
        }
    }

    /// Run a sync according to `options`.
    ///
    /// # Errors
    ///
    /// Fatal errors only: source enumeration failure, a corrupt ledger,
    /// strict-mode conflicts, or a ledger save failure at the end.
    /// Per-file I/O problems land in [`SyncReport::errors`].
    pub fn sync(&self, options: &SyncOptions) -> Result<SyncReport> {
        let files = walk_relative(self.source_root.as_ref(), SKIP_DIRS)?;
        let mut ledger = SyncLedger::load_or_default(self.target_root.as_ref())?;

        tracing::debug!(
            files = files.len(),
            init = options.init,
            dry_run = options.dry_run,
            "Planning sync"
        );

        let mut report = SyncReport::default();
        let mut pending: Vec<PendingWrite> = Vec::new();
        let mut verified: Vec<(String, String)> = Vec::new();

        for path in files {
            match self.manifest.classify(&path) {
                Classification::Internal => {
                    report.skipped.push(SkippedFile {
                        path,
                        reason: SkipReason::Internal,
                    });
                    continue;
                }
                Classification::InitOnly if !options.init => {
                    report.skipped.push(SkippedFile {
                        path,
                        reason: SkipReason::InitOnly,
                    });
                    continue;
                }
                _ => {}
            }

            let incoming = match fs::read(self.source_root.join(&path).as_ref()) {
                Ok(bytes) => bytes,
                Err(e) => {
                    report.errors.push(FileError {
                        path,
                        message: format!("failed to read source: {e}"),
                    });
                    continue;
                }
            };
            let incoming_checksum = compute_bytes_checksum(&incoming);

            let target_path = self.target_root.join(&path);
            if !target_path.exists() {
                // A first write cannot conflict.
                pending.push(PendingWrite {
                    path,
                    incoming,
                    checksum: incoming_checksum,
                    overwrite: false,
                });
                continue;
            }

            let local = match fs::read(target_path.as_ref()) {
                Ok(bytes) => bytes,
                Err(e) => {
                    report.errors.push(FileError {
                        path,
                        message: format!("failed to read target: {e}"),
                    });
                    continue;
                }
            };

            if local == incoming {
                verified.push((path.clone(), incoming_checksum));
                report.skipped.push(SkippedFile {
                    path,
                    reason: SkipReason::UpToDate,
                });
                continue;
            }

            let local_checksum = compute_bytes_checksum(&local);
            let locally_edited = match ledger.checksum(&path) {
                Some(snapshot) => snapshot != local_checksum,
                // No snapshot: any divergence from the incoming content
                // is a local edit.
                None => true,
            };

            if !locally_edited {
                pending.push(PendingWrite {
                    path,
                    incoming,
                    checksum: incoming_checksum,
                    overwrite: true,
                });
                continue;
            }

            let resolution = if options.overwrite_conflicts {
                ConflictResolution::Replaced
            } else {
                ConflictResolution::KeptLocal
            };
            report.conflicts.push(ConflictRecord {
                path: path.clone(),
                local_checksum,
                incoming_checksum: incoming_checksum.clone(),
                resolution,
            });
            if options.overwrite_conflicts {
                pending.push(PendingWrite {
                    path,
                    incoming,
                    checksum: incoming_checksum,
                    overwrite: true,
                });
            }
        }

        if options.strict && !report.conflicts.is_empty() {
            return Err(Error::ConflictsDetected {
                count: report.conflicts.len(),
            });
        }

        if options.dry_run {
            report.written = pending.into_iter().map(|w| w.path).collect();
            return Ok(report);
        }

        let backups = BackupSet::new(self.target_root.clone());
        for write in pending {
            if write.overwrite {
                match backups.back_up(&write.path) {
                    Ok(entry) => report.backups.push(entry),
                    Err(e) => {
                        report.errors.push(FileError {
                            path: write.path,
                            message: format!("backup failed, file not overwritten: {e}"),
                        });
                        continue;
                    }
                }
            }

            let target_path = self.target_root.join(&write.path);
            if let Some(parent) = target_path.as_ref().parent()
                && let Err(e) = fs::create_dir_all(parent)
            {
                report.errors.push(FileError {
                    path: write.path,
                    message: format!("failed to create directory: {e}"),
                });
                continue;
            }

            match fs::write(target_path.as_ref(), &write.incoming) {
                Ok(()) => {
                    ledger.record(&write.path, write.checksum);
                    report.written.push(write.path);
                }
                Err(e) => report.errors.push(FileError {
                    path: write.path,
                    message: format!("failed to write: {e}"),
                }),
            }
        }

        for (path, checksum) in verified {
            ledger.record(&path, checksum);
        }
        ledger.save(self.target_root.as_ref())?;

        tracing::debug!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            conflicts = report.conflicts.len(),
            errors = report.errors.len(),
            "Sync complete"
        );

        Ok(report)
    }
}
