//! Manifest loading and path classification
//!
//! The manifest descriptor at the source root declares two ordered pattern
//! lists, `internal` and `init_only`. Every relative path in the source
//! tree classifies into one of three buckets which drive both the sync and
//! push engines:
//!
//! - **Internal** — never shipped by any operation
//! - **InitOnly** — shipped only on a first-time (`--init`) sync, never
//!   pushed upstream
//! - **Distributable** — shipped by both sync and push

pub mod error;
pub mod ignore;
pub mod manifest;
pub mod pattern;

pub use error::{Error, Result};
pub use ignore::{IGNORE_FILE, IgnoreRules};
pub use manifest::{Classification, MANIFEST_FILE, Manifest};
pub use pattern::PatternList;
