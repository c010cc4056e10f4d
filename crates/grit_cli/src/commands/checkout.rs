//! Checkout and reset commands.

use anyhow::{bail, Context, Result};
use grit_core::{CommitId, Repository};

/// Dispatches the three checkout forms: a branch, a file from the
/// current head, or a file from a given commit.
pub fn run(target: Option<&str>, path: Option<&str>) -> Result<()> {
    let mut repo = Repository::open(".").context("Not a grit repository")?;
    match (target, path) {
        (Some(branch), None) => {
            repo.checkout_branch(branch)?;
            repo.save()?;
            println!("Switched to branch {}", branch);
        }
        (None, Some(path)) => {
            repo.checkout_file(path)?;
            println!("Restored {}", path);
        }
        (Some(commit), Some(path)) => {
            let id = CommitId::from_hex(commit)?;
            repo.checkout_file_at(id, path)?;
            println!("Restored {} from {}", path, commit);
        }
        (None, None) => bail!("Nothing to check out. Give a branch, or --path <file>."),
    }
    Ok(())
}

pub fn reset(commit: &str) -> Result<()> {
    let mut repo = Repository::open(".").context("Not a grit repository")?;
    let id = CommitId::from_hex(commit)?;
    repo.reset(id)?;
    repo.save()?;
    println!("Reset {} to {}", repo.current_branch(), commit);
    Ok(())
}
