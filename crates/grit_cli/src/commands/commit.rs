//! Commit command.

use anyhow::{Context, Result};
use grit_core::Repository;

pub fn run(message: &str) -> Result<()> {
    let mut repo = Repository::open(".").context("Not a grit repository")?;
    let id = repo.commit(message)?;
    repo.save()?;
    println!("Created commit {}", id.as_hex());
    Ok(())
}
