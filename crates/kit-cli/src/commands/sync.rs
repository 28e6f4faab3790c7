//! Sync command implementation

use std::path::Path;

use colored::Colorize;

use kit_core::{SyncEngine, SyncOptions, SyncReport};
use kit_manifest::Manifest;

use crate::error::{CliError, Result};

/// Run the sync command: distribute `source` into `target`.
pub fn run_sync(source: &Path, target: &Path, options: &SyncOptions) -> Result<()> {
    if !target.is_dir() {
        return Err(CliError::user(format!(
            "Target directory does not exist: {}",
            target.display()
        )));
    }

    let manifest = Manifest::load(source)?;
    let engine = SyncEngine::new(&manifest, source, target);

    println!(
        "{} Syncing kit from {} into {}{}",
        "=>".blue().bold(),
        source.display().to_string().cyan(),
        target.display().to_string().cyan(),
        if options.dry_run { " (dry run)" } else { "" }
    );

    let report = engine.sync(options)?;
    print_report(&report, options);

    if !report.errors.is_empty() {
        return Err(CliError::user(format!(
            "{} file(s) failed during sync",
            report.errors.len()
        )));
    }

    Ok(())
}

fn print_report(report: &SyncReport, options: &SyncOptions) {
    let verb = if options.dry_run { "Would write" } else { "Wrote" };
    for path in &report.written {
        println!("   {} {} {}", "+".green(), verb, path.cyan());
    }
    for skipped in &report.skipped {
        println!(
            "   {} Skipped {} ({})",
            "-".dimmed(),
            skipped.path.cyan(),
            skipped.reason.to_string().dimmed()
        );
    }
    for conflict in &report.conflicts {
        println!(
            "   {} Conflict {} ({})",
            "!".yellow(),
            conflict.path.cyan(),
            conflict.resolution
        );
    }
    for error in &report.errors {
        println!("   {} {}: {}", "!".red(), error.path.cyan(), error.message);
    }

    if !report.backups.is_empty() {
        println!(
            "{} Backed up {} file(s) before overwrite (under .kit/backups/).",
            "=>".blue().bold(),
            report.backups.len()
        );
    }

    if report.written.is_empty() && report.is_clean() {
        println!("{} Already up to date.", "OK".green().bold());
    } else if report.is_clean() {
        println!(
            "{} Sync complete: {} written, {} skipped.",
            "OK".green().bold(),
            report.written.len(),
            report.skipped.len()
        );
    } else if report.kept_local() > 0 {
        println!(
            "{} {} conflict(s) kept local. Re-run with {} to replace them.",
            "WARN".yellow().bold(),
            report.kept_local(),
            "--yes".cyan()
        );
    }
}
