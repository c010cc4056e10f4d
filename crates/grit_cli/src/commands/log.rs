//! History inspection commands.

use anyhow::{Context, Result};
use chrono::DateTime;
use console::style;
use grit_core::{Commit, Repository};

fn print_entry(commit: &Commit) {
    let timestamp = DateTime::from_timestamp(commit.timestamp, 0).unwrap_or_default();
    println!("{}", style("===").dim());
    println!("commit {}", style(commit.id.as_hex()).yellow());
    println!("Date: {}", timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("{}", commit.message);
    println!();
}

/// Current branch's history, newest first.
pub fn run() -> Result<()> {
    let repo = Repository::open(".").context("Not a grit repository")?;
    for commit in repo.log()? {
        print_entry(commit);
    }
    Ok(())
}

/// Every commit in the store, oldest first.
pub fn global() -> Result<()> {
    let repo = Repository::open(".").context("Not a grit repository")?;
    for commit in repo.global_log() {
        print_entry(commit);
    }
    Ok(())
}

/// Ids of commits carrying the exact message.
pub fn find(message: &str) -> Result<()> {
    let repo = Repository::open(".").context("Not a grit repository")?;
    let ids = repo.find(message);
    if ids.is_empty() {
        println!("Found no commit with that message.");
        return Ok(());
    }
    for id in ids {
        println!("{}", id.as_hex());
    }
    Ok(())
}
