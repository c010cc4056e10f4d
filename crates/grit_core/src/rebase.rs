//! Linear history rewriting (rebase and interactive replay).

use crate::commit::{Commit, CommitKind};
use crate::error::{GritError, Result};
use crate::graph::CommitGraph;
use crate::refs::RefIndex;
use tracing::{debug, info};

/// An operator's choice for one commit during interactive replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayDecision {
    /// Replay the commit unchanged.
    Keep,
    /// Replay the commit with a new message.
    Reword(String),
    /// Suppress the commit. Rejected for the endpoints of the sequence.
    Drop,
}

/// Source of per-commit decisions during replay.
///
/// The CLI implements this with a terminal prompt; non-interactive
/// rebase uses [`KeepAll`].
pub trait ReplayOperator {
    /// Decides what to do with one commit about to be replayed.
    fn decide(&mut self, commit: &Commit) -> ReplayDecision;
}

/// Keeps every commit unchanged.
pub struct KeepAll;

impl ReplayOperator for KeepAll {
    fn decide(&mut self, _commit: &Commit) -> ReplayDecision {
        ReplayDecision::Keep
    }
}

/// How a rebase concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebaseOutcome {
    /// The target is already contained in the current branch; nothing moved.
    AlreadyUpToDate,
    /// The head moved forward along an existing chain; no commits created.
    FastForwarded,
    /// Commits were replayed on top of the target head.
    Replayed {
        /// New commits created.
        replayed: usize,
        /// Commits dropped as skip placeholders.
        skipped: usize,
    },
}

/// Rewrites the current branch's commits to descend from `target_branch`.
///
/// The sequence strictly between the split point and the current head is
/// replayed oldest-first on top of the target head, consulting the
/// operator per commit. A dropped commit leaves a skip placeholder
/// parented on the current replay tip so traversal stays consistent, but
/// the tip itself does not advance past it. Dropping the original head
/// or the first commit after the split is rejected and treated as keep.
///
/// The caller restores working files to the new head afterwards.
///
/// # Errors
///
/// `UnknownBranch` if the target does not exist, `SelfRebase` if it is
/// the current branch.
pub fn rebase(
    graph: &mut CommitGraph,
    refs: &mut RefIndex,
    target_branch: &str,
    operator: &mut dyn ReplayOperator,
    now: i64,
) -> Result<RebaseOutcome> {
    let current_branch = refs.current().to_string();
    if !refs.contains(target_branch) {
        return Err(GritError::UnknownBranch(target_branch.to_string()));
    }
    if target_branch == current_branch {
        return Err(GritError::SelfRebase(target_branch.to_string()));
    }

    let head = refs.require_head(&current_branch)?;
    let target_head = refs.require_head(target_branch)?;

    if target_head == head || graph.is_ancestor(target_head, head) {
        return Ok(RebaseOutcome::AlreadyUpToDate);
    }
    if graph.is_ancestor(head, target_head) {
        refs.set_head(&current_branch, target_head);
        info!(branch = current_branch, to = %target_head, "fast-forward rebase");
        return Ok(RebaseOutcome::FastForwarded);
    }

    let split = graph
        .split_point(head, target_head)
        .or(graph.root())
        .ok_or_else(|| GritError::UnknownBranch(target_branch.to_string()))?;
    let sequence = graph.sequence_above(head, split);
    debug!(split = %split, commits = sequence.len(), "replaying onto target");

    let original_head = head;
    let mut new_tip = target_head;
    let mut replayed = 0usize;
    let mut skipped = 0usize;

    for original_id in sequence {
        let original = graph
            .get(original_id)
            .ok_or_else(|| GritError::UnknownCommit(original_id.as_hex()))?
            .clone();

        let mut decision = operator.decide(&original);
        if decision == ReplayDecision::Drop {
            let is_endpoint = original_id == original_head
                || graph.effective_parent(original_id) == Some(split);
            if is_endpoint {
                decision = ReplayDecision::Keep;
            }
        }

        match decision {
            ReplayDecision::Drop => {
                // The placeholder hangs off the current tip so forward and
                // backward traversal can step across it; the tip stays put.
                graph.create(
                    Some(new_tip),
                    &current_branch,
                    "",
                    now,
                    original.added.clone(),
                    original.removed.clone(),
                    Some(original_id),
                    CommitKind::Skipped,
                );
                skipped += 1;
            }
            ReplayDecision::Keep | ReplayDecision::Reword(_) => {
                let message = match decision {
                    ReplayDecision::Reword(new_message) => new_message,
                    _ => original.message.clone(),
                };
                new_tip = graph.create(
                    Some(new_tip),
                    &current_branch,
                    &message,
                    now,
                    original.added.clone(),
                    original.removed.clone(),
                    Some(original_id),
                    CommitKind::Normal,
                );
                replayed += 1;
            }
        }
    }

    refs.set_head(&current_branch, new_tip);
    info!(
        branch = current_branch,
        target = target_branch,
        replayed,
        skipped,
        "rebase finished"
    );
    Ok(RebaseOutcome::Replayed { replayed, skipped })
}
