//! Commit graph construction and traversal.
//!
//! History is a tree of single-parent chains: every commit has exactly
//! one parent, and the apparent branching comes from named branches plus
//! the per-branch `children` fan-out. Merges never create a two-parent
//! commit, so no general DAG machinery is needed.
//!
//! Each repository instance owns exactly one graph. Cross-instance
//! operations (push/pull) exchange [`CommitPayload`]s and ids rather
//! than sharing references, so a local graph can never alias a remote
//! one.

use crate::commit::{Commit, CommitKind};
use crate::CommitId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::debug;

/// The commit data that crosses a repository boundary during replication.
///
/// Identity travels with the payload: a commit adopted into another
/// store keeps its original id, which is what lets ancestry checks work
/// across two independently loaded repositories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitPayload {
    /// Original identity, preserved across stores.
    pub id: CommitId,
    /// Commit message.
    pub message: String,
    /// Creation time, unix seconds.
    pub timestamp: i64,
    /// Paths staged in the original commit.
    pub added: BTreeSet<String>,
    /// Paths removed in the original commit.
    pub removed: BTreeSet<String>,
}

impl From<&Commit> for CommitPayload {
    fn from(c: &Commit) -> Self {
        Self {
            id: c.id,
            message: c.message.clone(),
            timestamp: c.timestamp,
            added: c.added.clone(),
            removed: c.removed.clone(),
        }
    }
}

/// Arena of immutable commits plus the auxiliary lookup indices.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CommitGraph {
    commits: HashMap<CommitId, Commit>,
    /// The very first commit ever created in this store.
    root: Option<CommitId>,
    next_seq: u64,
    by_seq: BTreeMap<u64, CommitId>,
    by_message: HashMap<String, BTreeSet<CommitId>>,
}

impl CommitGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// The root commit id, if any commit exists.
    pub fn root(&self) -> Option<CommitId> {
        self.root
    }

    /// Number of commits, skipped placeholders included.
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    /// True if no commit has been created yet.
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Looks up a commit by id.
    pub fn get(&self, id: CommitId) -> Option<&Commit> {
        self.commits.get(&id)
    }

    /// True if the graph holds a commit with this id.
    pub fn contains(&self, id: CommitId) -> bool {
        self.commits.contains_key(&id)
    }

    /// Creates a new commit and links it into the graph.
    ///
    /// Mints a fresh identity, derives `all_files`/`provenance` from the
    /// parent, links `parent.children[branch]`, and registers the
    /// auxiliary indices. Skipped placeholders stay out of the message
    /// index so `find` and global log never surface them.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &mut self,
        parent: Option<CommitId>,
        branch: &str,
        message: &str,
        timestamp: i64,
        added: BTreeSet<String>,
        removed: BTreeSet<String>,
        replay_source: Option<CommitId>,
        kind: CommitKind,
    ) -> CommitId {
        let seq = self.next_seq;
        let id = CommitId::mint(message, timestamp, parent.as_ref(), seq);
        let commit = Commit::build(
            seq,
            id,
            parent.and_then(|p| self.commits.get(&p)),
            branch,
            message,
            timestamp,
            added,
            removed,
            replay_source,
            kind,
        );
        self.insert(commit, branch);
        debug!(id = %id, branch, message, "created commit");
        id
    }

    /// Materializes a commit replicated from another repository.
    ///
    /// The payload's original id is kept, so the adopted commit is the
    /// same commit as far as ancestry is concerned. Its bytes are stored
    /// independently in this store, so provenance for the added paths
    /// points at the commit itself.
    pub fn adopt(
        &mut self,
        payload: &CommitPayload,
        parent: Option<CommitId>,
        branch: &str,
    ) -> CommitId {
        let seq = self.next_seq;
        let commit = Commit::build(
            seq,
            payload.id,
            parent.and_then(|p| self.commits.get(&p)),
            branch,
            &payload.message,
            payload.timestamp,
            payload.added.clone(),
            payload.removed.clone(),
            None,
            CommitKind::Normal,
        );
        self.insert(commit, branch);
        debug!(id = %payload.id, branch, "adopted replicated commit");
        payload.id
    }

    fn insert(&mut self, commit: Commit, branch: &str) {
        let id = commit.id;
        if let Some(parent) = commit.parent {
            if let Some(p) = self.commits.get_mut(&parent) {
                p.children.insert(branch.to_string(), id);
            }
        }
        if self.root.is_none() {
            self.root = Some(id);
        }
        if !commit.is_skipped() {
            self.by_message
                .entry(commit.message.clone())
                .or_default()
                .insert(id);
        }
        self.by_seq.insert(commit.seq, id);
        self.next_seq = commit.seq + 1;
        self.commits.insert(id, commit);
    }

    /// The nearest non-skipped ancestor, one parent hop away.
    pub fn effective_parent(&self, id: CommitId) -> Option<CommitId> {
        let mut cursor = self.get(id)?.parent;
        while let Some(p) = cursor {
            let commit = self.get(p)?;
            if !commit.is_skipped() {
                return Some(p);
            }
            cursor = commit.parent;
        }
        None
    }

    /// The next non-skipped commit reached by continuing `branch`.
    pub fn next_along(&self, id: CommitId, branch: &str) -> Option<CommitId> {
        let mut cursor = self.get(id)?.children.get(branch).copied();
        while let Some(c) = cursor {
            let commit = self.get(c)?;
            if !commit.is_skipped() {
                return Some(c);
            }
            cursor = commit.children.get(branch).copied();
        }
        None
    }

    /// True if `candidate` is a proper ancestor of `of`.
    ///
    /// A commit is not its own ancestor. Skipped placeholders are
    /// stepped over transparently.
    pub fn is_ancestor(&self, candidate: CommitId, of: CommitId) -> bool {
        let mut cursor = self.effective_parent(of);
        while let Some(c) = cursor {
            if c == candidate {
                return true;
            }
            cursor = self.effective_parent(c);
        }
        false
    }

    /// The most recent commit reachable from both `a` and `b`.
    ///
    /// Within one store both chains share a root, so this only returns
    /// `None` when `a` or `b` is unknown. See [`split_point_between`]
    /// for the cross-store case.
    pub fn split_point(&self, a: CommitId, b: CommitId) -> Option<CommitId> {
        split_point_between(self, a, self, b)
    }

    /// Commits strictly after `split`, up to and including `head`,
    /// oldest first. Empty when `head == split`.
    pub fn sequence_above(&self, head: CommitId, split: CommitId) -> Vec<CommitId> {
        let mut chain = Vec::new();
        let mut cursor = Some(head);
        while let Some(c) = cursor {
            if c == split {
                break;
            }
            chain.push(c);
            cursor = self.effective_parent(c);
        }
        chain.reverse();
        chain
    }

    /// Ids of all commits carrying the exact message, sorted.
    pub fn find_by_message(&self, message: &str) -> Vec<CommitId> {
        self.by_message
            .get(message)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    /// All non-skipped commits in creation order.
    pub fn iter_commits(&self) -> impl Iterator<Item = &Commit> {
        self.by_seq
            .values()
            .filter_map(|id| self.commits.get(id))
            .filter(|c| !c.is_skipped())
    }
}

/// Alternating lockstep ancestor search across two graphs.
///
/// Advances both cursors one parent step at a time, each checking the
/// other side's visited set, like finding the meeting point of two
/// singly-linked lists. Returns `None` when the chains are fully
/// disjoint, which can happen between two independently initialized
/// stores during pull.
pub fn split_point_between(
    graph_a: &CommitGraph,
    a: CommitId,
    graph_b: &CommitGraph,
    b: CommitId,
) -> Option<CommitId> {
    let mut seen_a: HashSet<CommitId> = HashSet::new();
    let mut seen_b: HashSet<CommitId> = HashSet::new();
    let mut cursor_a = graph_a.contains(a).then_some(a);
    let mut cursor_b = graph_b.contains(b).then_some(b);

    while cursor_a.is_some() || cursor_b.is_some() {
        if let Some(x) = cursor_a {
            if seen_b.contains(&x) {
                return Some(x);
            }
            seen_a.insert(x);
            cursor_a = graph_a.effective_parent(x);
        }
        if let Some(y) = cursor_b {
            if seen_a.contains(&y) {
                return Some(y);
            }
            seen_b.insert(y);
            cursor_b = graph_b.effective_parent(y);
        }
    }
    None
}
