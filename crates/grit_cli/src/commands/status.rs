//! Status command.

use anyhow::{Context, Result};
use console::style;
use grit_core::Repository;

pub fn run() -> Result<()> {
    let repo = Repository::open(".").context("Not a grit repository")?;
    let report = repo.status();

    println!("{}", style("=== Branches ===").bold());
    for branch in &report.branches {
        if *branch == report.current_branch {
            println!("*{}", branch);
        } else {
            println!(" {}", branch);
        }
    }

    println!();
    println!("{}", style("=== Staged Files ===").bold());
    for path in &report.staged {
        println!("{}", path);
    }

    println!();
    println!("{}", style("=== Removed Files ===").bold());
    for path in &report.pending_removal {
        println!("{}", path);
    }

    Ok(())
}
