//! Remote management and replication commands.

use anyhow::{Context, Result};
use grit_core::{LocalTransport, PullOutcome, PushOutcome, Repository};

fn open() -> Result<Repository> {
    Repository::open(".").context("Not a grit repository")
}

pub fn add(name: &str, login: &str, location: &str) -> Result<()> {
    let mut repo = open()?;
    repo.add_remote(name, login, location)?;
    repo.save()?;
    println!("Added remote {} at {}", name, location);
    Ok(())
}

pub fn remove(name: &str) -> Result<()> {
    let mut repo = open()?;
    repo.remove_remote(name)?;
    repo.save()?;
    println!("Removed remote {}", name);
    Ok(())
}

pub fn list() -> Result<()> {
    let repo = open()?;
    for name in repo.remote_names() {
        println!("{}", name);
    }
    Ok(())
}

pub fn push(remote: &str, branch: &str) -> Result<()> {
    let mut repo = open()?;
    let outcome = repo.push(remote, branch, &LocalTransport)?;
    repo.save()?;
    match outcome {
        PushOutcome::AlreadyUpToDate => println!("Already up to date."),
        PushOutcome::Pushed(count) => println!("Pushed {} commits to {}.", count, remote),
    }
    Ok(())
}

pub fn pull(remote: &str, branch: &str) -> Result<()> {
    let mut repo = open()?;
    let outcome = repo.pull(remote, branch, &LocalTransport)?;
    repo.save()?;
    match outcome {
        PullOutcome::AlreadyUpToDate => println!("Already up to date."),
        PullOutcome::FastForwarded(count) => {
            println!("Fast-forwarded {} by {} commits.", branch, count)
        }
        PullOutcome::Rebased { adopted } => println!(
            "Adopted {} remote commits and replayed local changes on top.",
            adopted
        ),
        PullOutcome::Unrelated => {
            println!("The remote shares no history with this repository; nothing pulled.")
        }
    }
    Ok(())
}

pub fn clone(remote: &str) -> Result<()> {
    let mut repo = open()?;
    let dest = repo.clone_remote(remote, &LocalTransport)?;
    println!("Cloned {} into {}", remote, dest.display());
    Ok(())
}
