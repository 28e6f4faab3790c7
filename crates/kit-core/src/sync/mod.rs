//! Sync engine: distribute the kit source tree into a consumer repo

mod engine;
mod report;

pub use engine::{SyncEngine, SyncOptions};
pub use report::{
    ConflictRecord, ConflictResolution, FileError, SkipReason, SkippedFile, SyncReport,
};
