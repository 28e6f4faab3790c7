//! Command implementations

mod push;
mod sync;

pub use push::run_push;
pub use sync::run_sync;
