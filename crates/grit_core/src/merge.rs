//! Three-way merge over working files.
//!
//! The merge engine reconciles the current branch head with another
//! branch's head by mutating working files only. It never creates a
//! merge commit: the result must be committed separately, and conflict
//! handling is whole-file, one-sided. When both sides diverged for the
//! same path, the given side's version lands next to the current one
//! under a `.conflicted` suffix instead of being content-merged.

use crate::error::{GritError, Result};
use crate::fs::FileStore;
use crate::graph::CommitGraph;
use crate::refs::RefIndex;
use crate::snapshot::SnapshotStore;
use tracing::{debug, info};

/// Paths the merge touched, by outcome.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// Files restored from the given branch into the working tree.
    pub restored: Vec<String>,
    /// Files written as `<path><suffix>` because both sides diverged.
    pub conflicts: Vec<String>,
    /// Files the current branch alone changed, left as they are.
    pub kept: Vec<String>,
}

/// Merges `given_branch` into the current branch's working files.
///
/// For every path live in either head, the split point's, the current
/// head's, and the given head's last-modifying commits are compared
/// through provenance. A path the given side alone changed is restored
/// from the given head; a path both sides changed becomes a conflict
/// file; everything else is left untouched. Missing files are "absent",
/// never errors.
///
/// # Errors
///
/// `UnknownBranch` if `given_branch` does not exist, `SelfMerge` if it
/// is the current branch.
pub fn merge(
    graph: &CommitGraph,
    snapshots: &SnapshotStore,
    working: &dyn FileStore,
    refs: &RefIndex,
    given_branch: &str,
    conflict_suffix: &str,
) -> Result<MergeReport> {
    let current_branch = refs.current();
    if !refs.contains(given_branch) {
        return Err(GritError::UnknownBranch(given_branch.to_string()));
    }
    if given_branch == current_branch {
        return Err(GritError::SelfMerge(given_branch.to_string()));
    }

    let current_head = refs.require_head(current_branch)?;
    let given_head = refs.require_head(given_branch)?;
    // Within one store both chains share the root, so the lockstep walk
    // always meets; the root fallback covers a degenerate empty graph.
    let split = graph
        .split_point(current_head, given_head)
        .or(graph.root())
        .ok_or_else(|| GritError::UnknownBranch(given_branch.to_string()))?;
    debug!(current = %current_head, given = %given_head, split = %split, "merge split point");

    let current = graph
        .get(current_head)
        .ok_or_else(|| GritError::UnknownCommit(current_head.as_hex()))?;
    let given = graph
        .get(given_head)
        .ok_or_else(|| GritError::UnknownCommit(given_head.as_hex()))?;
    let split_commit = graph
        .get(split)
        .ok_or_else(|| GritError::UnknownCommit(split.as_hex()))?;

    let mut paths: Vec<&String> = current.all_files.union(&given.all_files).collect();
    paths.sort();

    let mut report = MergeReport::default();
    for path in paths {
        let at_split = split_commit.bytes_owner(path);
        let at_current = current.bytes_owner(path);
        let at_given = given.bytes_owner(path);

        match (at_current, at_given) {
            // Absent everywhere relevant.
            (None, None) => {}
            // Only the given side has it: bring it in.
            (None, Some(_)) => {
                snapshots.restore(graph, given_head, path, path, working)?;
                report.restored.push(path.clone());
            }
            // Only the current side has it: keep the working copy.
            (Some(_), None) => {}
            (Some(current_last), Some(given_last)) => {
                let current_diverged = Some(current_last) != at_split;
                let given_diverged = Some(given_last) != at_split;
                if current_diverged && given_diverged {
                    // Both sides changed it: park the given version next
                    // to the untouched current one.
                    let dest = format!("{path}{conflict_suffix}");
                    snapshots.restore(graph, given_head, path, &dest, working)?;
                    report.conflicts.push(path.clone());
                } else if given_diverged {
                    snapshots.restore(graph, given_head, path, path, working)?;
                    report.restored.push(path.clone());
                } else if current_diverged {
                    report.kept.push(path.clone());
                }
                // Neither side diverged: nothing to report.
            }
        }
    }

    info!(
        branch = given_branch,
        restored = report.restored.len(),
        conflicts = report.conflicts.len(),
        "merge finished"
    );
    Ok(report)
}
