//! Version-control gateway for the kit distributor
//!
//! Engines talk to version control exclusively through the [`VcsGateway`]
//! trait: structured command execution plus a pair of repository state
//! queries. The shipped implementation runs `git` and `gh` as
//! subprocesses and answers state queries in-process via `git2`.

pub mod error;
pub mod gateway;
pub mod naming;

pub use error::{Error, Result};
pub use gateway::{ProcessGateway, VcsGateway, VcsOutput};
pub use naming::{contribution_branch, repo_name_from_remote};
