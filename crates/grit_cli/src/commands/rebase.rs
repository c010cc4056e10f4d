//! Rebase command, with an optional per-commit prompt.

use anyhow::{Context, Result};
use console::style;
use grit_core::{Commit, KeepAll, RebaseOutcome, Repository, ReplayDecision, ReplayOperator};
use std::io::{self, BufRead, Write};

/// Asks on the terminal what to do with each replayed commit.
struct PromptOperator;

impl PromptOperator {
    fn read_line(&self) -> Option<String> {
        let mut input = String::new();
        io::stdin().lock().read_line(&mut input).ok()?;
        Some(input.trim().to_string())
    }
}

impl ReplayOperator for PromptOperator {
    fn decide(&mut self, commit: &Commit) -> ReplayDecision {
        println!(
            "Replaying {} {}",
            style(&commit.id.as_hex()[..12]).yellow(),
            commit.message
        );
        loop {
            print!("(c)ontinue, (s)kip, or change the (m)essage? ");
            if io::stdout().flush().is_err() {
                return ReplayDecision::Keep;
            }
            let answer = match self.read_line() {
                Some(answer) => answer,
                None => return ReplayDecision::Keep,
            };
            match answer.as_str() {
                "c" | "" => return ReplayDecision::Keep,
                "s" => return ReplayDecision::Drop,
                "m" => {
                    print!("New message: ");
                    if io::stdout().flush().is_err() {
                        return ReplayDecision::Keep;
                    }
                    match self.read_line() {
                        Some(message) if !message.is_empty() => {
                            return ReplayDecision::Reword(message)
                        }
                        _ => println!("Message unchanged."),
                    }
                }
                _ => {}
            }
        }
    }
}

pub fn run(branch: &str, interactive: bool) -> Result<()> {
    let mut repo = Repository::open(".").context("Not a grit repository")?;
    let outcome = if interactive {
        repo.rebase_with(branch, &mut PromptOperator)
    } else {
        repo.rebase_with(branch, &mut KeepAll)
    }?;
    repo.save()?;

    match outcome {
        RebaseOutcome::AlreadyUpToDate => println!("Already up to date."),
        RebaseOutcome::FastForwarded => println!("Fast-forwarded onto {}.", branch),
        RebaseOutcome::Replayed { replayed, skipped } => {
            println!("Replayed {} commits onto {}.", replayed, branch);
            if skipped > 0 {
                println!("Skipped {} commits.", skipped);
            }
        }
    }
    Ok(())
}
