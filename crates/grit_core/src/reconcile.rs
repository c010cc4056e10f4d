//! Push and pull reconciliation between two repository instances.
//!
//! Both sides are fully materialized repositories; the transport has
//! already staged the remote one locally. Commits keep their identity
//! when they cross stores, so ancestry checks work across graphs.

use crate::commit::CommitKind;
use crate::error::{GritError, Result};
use crate::graph::{split_point_between, CommitPayload};
use crate::repo::{unix_now, Repository};
use crate::CommitId;
use tracing::info;

/// What a push did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The remote branch already sits at the local head.
    AlreadyUpToDate,
    /// This many commits were appended to the remote branch.
    Pushed(usize),
}

/// What a pull did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    /// The local branch already contains the remote head.
    AlreadyUpToDate,
    /// The local branch was advanced along the remote chain.
    FastForwarded(usize),
    /// Histories diverged; the remote side was adopted and the local
    /// head replayed on top of it.
    Rebased {
        /// Remote commits adopted below the replayed head.
        adopted: usize,
    },
    /// The two stores share no history at all; nothing was changed.
    Unrelated,
}

/// Appends the local branch's new commits to the remote repository.
///
/// The remote branch is created at the remote's current head when it
/// does not exist yet. Fails with `NeedsPull`, before any remote
/// mutation, unless the remote head is an ancestor of the local head.
pub fn push_into(
    local: &Repository,
    remote: &mut Repository,
    branch: &str,
) -> Result<PushOutcome> {
    let local_head = local.state.refs.require_head(branch)?;
    if !remote.state.refs.contains(branch) {
        let at = remote.state.refs.require_head(remote.state.refs.current())?;
        remote.state.refs.create_branch(branch, at)?;
    }
    let remote_head = remote.state.refs.require_head(branch)?;

    if remote_head == local_head {
        return Ok(PushOutcome::AlreadyUpToDate);
    }
    if !local.state.graph.contains(remote_head)
        || !local.state.graph.is_ancestor(remote_head, local_head)
    {
        return Err(GritError::NeedsPull);
    }

    let mut tip = remote_head;
    let mut pushed = 0;
    while tip != local_head {
        let next = local
            .state
            .graph
            .next_along(tip, branch)
            .ok_or(GritError::NeedsPull)?;
        adopt_one(remote, local, next, tip, branch)?;
        remote.state.refs.set_head(branch, next);
        tip = next;
        pushed += 1;
    }
    info!(branch, pushed, "pushed commits to remote");
    Ok(PushOutcome::Pushed(pushed))
}

/// Brings the remote branch's new commits into the local repository.
///
/// A remote head already known locally is a no-op. A local head that
/// is an ancestor of the remote head fast-forwards. Anything else
/// adopts the remote side above the split point and replays the local
/// head on top of it. Working files are restored when `branch` is the
/// active branch.
pub fn pull_into(
    local: &mut Repository,
    remote: &Repository,
    branch: &str,
) -> Result<PullOutcome> {
    if !remote.state.refs.contains(branch) {
        return Err(GritError::RemoteMissingBranch(branch.to_string()));
    }
    let remote_head = remote.state.refs.require_head(branch)?;
    let local_head = local.state.refs.require_head(branch)?;

    if remote_head == local_head
        || (local.state.graph.contains(remote_head)
            && local.state.graph.is_ancestor(remote_head, local_head))
    {
        return Ok(PullOutcome::AlreadyUpToDate);
    }

    if remote.state.graph.contains(local_head)
        && remote.state.graph.is_ancestor(local_head, remote_head)
    {
        let mut tip = local_head;
        let mut adopted = 0;
        while tip != remote_head {
            let next = remote
                .state
                .graph
                .next_along(tip, branch)
                .ok_or_else(|| GritError::UnknownCommit(remote_head.as_hex()))?;
            adopt_one(local, remote, next, tip, branch)?;
            local.state.refs.set_head(branch, next);
            tip = next;
            adopted += 1;
        }
        restore_if_current(local, branch)?;
        info!(branch, adopted, "fast-forwarded from remote");
        return Ok(PullOutcome::FastForwarded(adopted));
    }

    let split = match split_point_between(
        &remote.state.graph,
        remote_head,
        &local.state.graph,
        local_head,
    ) {
        Some(split) => split,
        None => return Ok(PullOutcome::Unrelated),
    };

    let sequence = remote.state.graph.sequence_above(remote_head, split);
    let mut tip = split;
    let mut adopted = 0;
    for id in sequence {
        adopt_one(local, remote, id, tip, branch)?;
        tip = id;
        adopted += 1;
    }

    // Replay the displaced local head on the adopted remote tip. Its
    // bytes stay with the original commit via the replay source.
    let original = local
        .state
        .graph
        .get(local_head)
        .ok_or_else(|| GritError::UnknownCommit(local_head.as_hex()))?
        .clone();
    let new_head = local.state.graph.create(
        Some(tip),
        branch,
        &original.message,
        unix_now(),
        original.added.clone(),
        original.removed.clone(),
        Some(local_head),
        CommitKind::Normal,
    );
    local.state.refs.set_head(branch, new_head);
    restore_if_current(local, branch)?;
    info!(branch, adopted, "pulled divergent remote history");
    Ok(PullOutcome::Rebased { adopted })
}

/// Copies one commit, with its snapshot bytes, from `src` into `dst`,
/// parented on `parent`. The commit keeps its id.
fn adopt_one(
    dst: &mut Repository,
    src: &Repository,
    id: CommitId,
    parent: CommitId,
    branch: &str,
) -> Result<()> {
    let commit = src
        .state
        .graph
        .get(id)
        .ok_or_else(|| GritError::UnknownCommit(id.as_hex()))?;
    let payload = CommitPayload::from(commit);
    let files = src.snapshots.export(&src.state.graph, id)?;
    dst.state.graph.adopt(&payload, Some(parent), branch);
    dst.snapshots.install(id, &files)?;
    Ok(())
}

fn restore_if_current(repo: &Repository, branch: &str) -> Result<()> {
    if branch != repo.state.refs.current() {
        return Ok(());
    }
    let head = repo.state.refs.require_head(branch)?;
    repo.snapshots
        .restore_all(&repo.state.graph, head, &repo.working)
}
