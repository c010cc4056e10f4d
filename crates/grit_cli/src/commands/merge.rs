//! Merge command.

use anyhow::{Context, Result};
use console::style;
use grit_core::Repository;

pub fn run(branch: &str) -> Result<()> {
    let mut repo = Repository::open(".").context("Not a grit repository")?;
    let report = repo.merge(branch)?;
    repo.save()?;

    for path in &report.restored {
        println!("Restored {} from {}", path, branch);
    }
    for path in &report.conflicts {
        println!(
            "{} Both sides changed {}; wrote the {} version next to it.",
            style("Conflict:").red(),
            path,
            branch
        );
    }
    if report.restored.is_empty() && report.conflicts.is_empty() && report.kept.is_empty() {
        println!("Nothing to merge from {}.", branch);
    } else {
        println!(
            "Merged {} into the working tree. Commit the result to keep it.",
            branch
        );
    }
    Ok(())
}
