//! kit distributor CLI
//!
//! The command-line interface for distributing shared tooling into
//! consumer repositories and contributing edits back upstream.

mod cli;
mod commands;
mod error;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} kit distributor CLI", "kit".green().bold());
            println!();
            println!("Run {} for available commands.", "kit --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Sync {
            target,
            init,
            yes,
            strict,
            dry_run,
            source,
        } => {
            let options = kit_core::SyncOptions {
                init,
                overwrite_conflicts: yes,
                strict,
                dry_run,
            };
            commands::run_sync(&source, &target, &options)
        }
        Commands::Push {
            include,
            exclude,
            dry_run,
            title,
            body,
            upstream,
        } => {
            let cwd = std::env::current_dir()?;
            commands::run_push(&upstream, &cwd, &include, &exclude, dry_run, title, body)
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "kit", &mut std::io::stdout());
            Ok(())
        }
    }
}
