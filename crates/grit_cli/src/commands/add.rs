//! Staging command.

use anyhow::{Context, Result};
use grit_core::Repository;

pub fn run(path: &str) -> Result<()> {
    let mut repo = Repository::open(".").context("Not a grit repository")?;
    repo.add(path)?;
    repo.save()?;
    println!("Staged {}", path);
    Ok(())
}
