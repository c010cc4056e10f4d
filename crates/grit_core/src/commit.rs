//! The immutable commit record.

use crate::CommitId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Visibility of a commit node in traversal.
///
/// Skipped nodes exist only as placeholders produced by interactive
/// replay when a commit is dropped. Traversal primitives step over them
/// transparently, so higher-level algorithms never observe them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitKind {
    /// A regular commit, visible in history.
    Normal,
    /// A replay placeholder dropped during interactive rebase.
    Skipped,
}

/// An immutable snapshot record in the commit graph.
///
/// Every derived field (`all_files`, `provenance`) is computed once at
/// construction from the parent plus the staged change sets, and never
/// mutated afterward. The only post-construction mutation is the
/// `children` fan-out, which the graph updates when a descendant is
/// created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    /// Process-local sequence number, used for auxiliary indexing only.
    pub seq: u64,
    /// Canonical identity; equality of commits is equality of this value.
    pub id: CommitId,
    /// Parent commit. `None` only for the very first commit of a store.
    pub parent: Option<CommitId>,
    /// Branch that was active when this commit was created.
    pub origin_branch: String,
    /// Commit message.
    pub message: String,
    /// Creation time, unix seconds.
    pub timestamp: i64,
    /// Paths explicitly staged for this commit.
    pub added: BTreeSet<String>,
    /// Paths explicitly marked for removal in this commit.
    pub removed: BTreeSet<String>,
    /// Derived: `(parent.all_files ∪ added) − removed`. Frozen.
    pub all_files: BTreeSet<String>,
    /// Path → commit holding the authoritative stored bytes for that path.
    pub provenance: BTreeMap<String, CommitId>,
    /// The original commit this one was replayed from, if any. Carries
    /// the change sets forward during replay; never part of identity.
    pub replay_source: Option<CommitId>,
    /// Normal or skipped placeholder.
    pub kind: CommitKind,
    /// Branch name → the immediate next commit along that branch.
    pub children: BTreeMap<String, CommitId>,
}

impl Commit {
    /// Builds a commit record from its parent and staged change sets.
    ///
    /// Provenance for an added path points at this commit itself for a
    /// direct commit, and at `replay_source` for a replayed one, since a
    /// replay does not re-store bytes. The caller (the graph) links
    /// `parent.children` and registers indices.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn build(
        seq: u64,
        id: CommitId,
        parent: Option<&Commit>,
        branch: &str,
        message: &str,
        timestamp: i64,
        added: BTreeSet<String>,
        removed: BTreeSet<String>,
        replay_source: Option<CommitId>,
        kind: CommitKind,
    ) -> Self {
        let mut all_files = added.clone();
        let mut provenance = BTreeMap::new();

        if let Some(parent) = parent {
            for (path, owner) in &parent.provenance {
                if !removed.contains(path) {
                    provenance.insert(path.clone(), *owner);
                }
            }
            for path in &parent.all_files {
                if !removed.contains(path) {
                    all_files.insert(path.clone());
                }
            }
        }

        let bytes_owner = replay_source.unwrap_or(id);
        for path in &added {
            provenance.insert(path.clone(), bytes_owner);
        }
        for path in &removed {
            provenance.remove(path);
            all_files.remove(path);
        }

        Self {
            seq,
            id,
            parent: parent.map(|p| p.id),
            origin_branch: branch.to_string(),
            message: message.to_string(),
            timestamp,
            added,
            removed,
            all_files,
            provenance,
            replay_source,
            kind,
            children: BTreeMap::new(),
        }
    }

    /// True if this node is a skipped replay placeholder.
    pub fn is_skipped(&self) -> bool {
        self.kind == CommitKind::Skipped
    }

    /// True if this commit was produced by the replay engine.
    pub fn is_replay(&self) -> bool {
        self.replay_source.is_some()
    }

    /// True if the path is live in this commit's tree.
    pub fn tracks(&self, path: &str) -> bool {
        self.all_files.contains(path)
    }

    /// The commit whose snapshot holds the bytes for `path`, if any.
    pub fn bytes_owner(&self, path: &str) -> Option<CommitId> {
        self.provenance.get(path).copied()
    }
}
