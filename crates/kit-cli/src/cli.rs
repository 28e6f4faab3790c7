//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// kit - distribute shared tooling into consumer repositories
#[derive(Parser, Debug)]
#[command(name = "kit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Distribute the kit source tree into a consumer repository
    ///
    /// Internal files never ship; init-only files ship on `--init` runs
    /// only. Files with local edits are kept and reported as conflicts
    /// unless `--yes` overwrites them (after a backup).
    ///
    /// Examples:
    ///   kit sync                      # update the current directory
    ///   kit sync ../my-repo --init    # first-time setup of a repo
    ///   kit sync --yes                # replace conflicting files
    Sync {
        /// Consumer repository to sync into
        #[arg(default_value = ".")]
        target: PathBuf,

        /// First-time sync: also ship init-only files
        #[arg(long)]
        init: bool,

        /// Overwrite conflicting files (after backup) instead of keeping
        /// local edits
        #[arg(short, long)]
        yes: bool,

        /// Abort without writing if any conflict is detected
        #[arg(long)]
        strict: bool,

        /// Preview the run without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Kit source tree to distribute from
        #[arg(long, env = "KIT_HOME")]
        source: PathBuf,
    },

    /// Contribute local kit edits upstream as a pull request
    ///
    /// Computes the contribution set through the classification, exclude,
    /// ignore-rule, and byte-diff filters, then forks, branches, commits,
    /// and opens a pull request. `--dry-run` prints the plan and stops.
    Push {
        /// Additional paths to contribute (glob, may repeat)
        #[arg(short, long)]
        include: Vec<String>,

        /// Paths to withhold (glob, may repeat)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Print the plan without touching version control
        #[arg(long)]
        dry_run: bool,

        /// Pull request title (also used as the commit message)
        #[arg(long)]
        title: Option<String>,

        /// Pull request body
        #[arg(long)]
        body: Option<String>,

        /// Upstream kit working tree to contribute through
        #[arg(long, env = "KIT_HOME")]
        upstream: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
