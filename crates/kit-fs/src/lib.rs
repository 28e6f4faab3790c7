//! Filesystem primitives for the kit distributor
//!
//! Provides normalized path handling, canonical checksums, and recursive
//! file enumeration used by the classification and sync layers.

pub mod checksum;
pub mod error;
pub mod path;
pub mod walk;

pub use checksum::{compute_bytes_checksum, compute_file_checksum};
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use walk::walk_relative;
