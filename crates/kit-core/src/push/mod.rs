//! Push engine: contribute consumer-side edits upstream

mod engine;
mod plan;

pub use engine::{PushEngine, PushOptions, PushReceipt};
pub use plan::{ChangeKind, DropReason, DroppedFile, InclusionReason, PushEntry, PushPlan};
