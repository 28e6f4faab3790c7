//! Sync and push engines for the kit distributor
//!
//! The sync engine writes the distributable file set from the kit source
//! tree into a consumer repository, detecting local edits and backing up
//! anything it overwrites. The push engine computes the upstream
//! contribution set through a staged filter pipeline and drives the VCS
//! gateway to turn it into a pull request.

pub mod backup;
pub mod error;
pub mod ledger;
pub mod push;
pub mod sync;

pub use backup::{BackupEntry, BackupSet};
pub use error::{Error, Result};
pub use ledger::SyncLedger;
pub use push::{
    ChangeKind, DropReason, DroppedFile, InclusionReason, PushEngine, PushEntry, PushOptions,
    PushPlan, PushReceipt,
};
pub use sync::{
    ConflictRecord, ConflictResolution, FileError, SkipReason, SkippedFile, SyncEngine,
    SyncOptions, SyncReport,
};

/// Directory inside a consumer repository holding kit state
/// (the sync ledger and pre-overwrite backups).
pub const STATE_DIR: &str = ".kit";

/// Directories pruned from every enumeration.
pub(crate) const SKIP_DIRS: &[&str] = &[".git", STATE_DIR];
