//! Branch management commands.

use anyhow::{Context, Result};
use grit_core::Repository;

pub fn create(name: &str) -> Result<()> {
    let mut repo = Repository::open(".").context("Not a grit repository")?;
    repo.branch(name)?;
    repo.save()?;
    println!("Created branch {}", name);
    Ok(())
}

pub fn remove(name: &str) -> Result<()> {
    let mut repo = Repository::open(".").context("Not a grit repository")?;
    repo.remove_branch(name)?;
    repo.save()?;
    println!("Removed branch {}", name);
    Ok(())
}
