//! Push command implementation

use std::path::Path;

use colored::Colorize;

use kit_core::{PushEngine, PushOptions, PushPlan};
use kit_git::ProcessGateway;
use kit_manifest::Manifest;

use crate::error::{CliError, Result};

/// Run the push command: contribute edits from `repo_root` through the
/// upstream working tree at `upstream`.
pub fn run_push(
    upstream: &Path,
    repo_root: &Path,
    include: &[String],
    exclude: &[String],
    dry_run: bool,
    title: Option<String>,
    body: Option<String>,
) -> Result<()> {
    if !upstream.is_dir() {
        return Err(CliError::user(format!(
            "Upstream kit tree does not exist: {}",
            upstream.display()
        )));
    }

    let manifest = Manifest::load(upstream)?;
    let gateway = ProcessGateway::new();
    let engine = PushEngine::new(&manifest, upstream, repo_root, &gateway);

    println!(
        "{} Computing contribution set for {}",
        "=>".blue().bold(),
        repo_root.display().to_string().cyan()
    );

    let plan = engine.plan(include, exclude)?;
    print_plan(&plan);

    if plan.is_empty() {
        println!("{} Nothing to push.", "OK".green().bold());
        return Ok(());
    }

    if dry_run {
        println!(
            "{} Dry run: {} file(s) would be pushed.",
            "OK".green().bold(),
            plan.entries.len()
        );
        return Ok(());
    }

    let options = PushOptions { title, body };
    let receipt = engine.submit(&plan, &options)?;

    if !receipt.committed {
        println!(
            "{} No changes to commit on {}.",
            "OK".green().bold(),
            receipt.branch.cyan()
        );
        return Ok(());
    }

    match (&receipt.pr_url, receipt.pr_already_open) {
        (Some(url), true) => println!(
            "{} Updated existing pull request: {}",
            "OK".green().bold(),
            url.cyan()
        ),
        (Some(url), false) => println!(
            "{} Opened pull request: {}",
            "OK".green().bold(),
            url.cyan()
        ),
        (None, _) => println!(
            "{} Pushed branch {}.",
            "OK".green().bold(),
            receipt.branch.cyan()
        ),
    }

    Ok(())
}

fn print_plan(plan: &PushPlan) {
    for entry in &plan.entries {
        println!(
            "   {} {} ({}, {})",
            "+".green(),
            entry.path.cyan(),
            entry.change,
            entry.reason.to_string().dimmed()
        );
    }
    for dropped in &plan.dropped {
        println!(
            "   {} {} ({})",
            "-".dimmed(),
            dropped.path.dimmed(),
            dropped.reason.to_string().dimmed()
        );
    }
    for error in &plan.errors {
        println!("   {} {}: {}", "!".red(), error.path.cyan(), error.message);
    }
}
