//! Repository initialization command.

use anyhow::Result;
use grit_core::Repository;

pub fn run() -> Result<()> {
    let repo = Repository::init(".")?;
    println!(
        "Initialized empty grit repository on branch {}",
        repo.current_branch()
    );
    Ok(())
}
