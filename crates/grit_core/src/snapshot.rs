//! Per-commit snapshot storage (the content store).
//!
//! Every commit that directly stages files gets a snapshot directory
//! keyed by its identity, holding full copies of exactly the staged
//! paths. Replayed commits store nothing: their provenance points back
//! at the commit that did.

use crate::error::{GritError, Result};
use crate::fs::{FileStore, OsFileStore};
use crate::graph::CommitGraph;
use crate::{Commit, CommitId};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Snapshot storage rooted at `.grit/objects`.
///
/// Layout: `objects/<commit hex id>/<relative path>`.
#[derive(Debug)]
pub struct SnapshotStore {
    inner: OsFileStore,
}

impl SnapshotStore {
    /// Creates a store at the given objects directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            inner: OsFileStore::new(root),
        }
    }

    /// The objects directory.
    pub fn root(&self) -> &Path {
        self.inner.root()
    }

    fn key(id: CommitId, path: &str) -> String {
        format!("{}/{}", id.as_hex(), path)
    }

    /// Copies the current working bytes of every staged path into the
    /// commit's snapshot directory.
    ///
    /// A replayed commit or skip placeholder stores nothing; its bytes
    /// are reachable through provenance.
    pub fn capture(&self, commit: &Commit, working: &dyn FileStore) -> Result<()> {
        if commit.is_replay() || commit.is_skipped() {
            return Ok(());
        }
        for path in &commit.added {
            let bytes = working.read_bytes(path)?;
            self.inner.write_bytes(&Self::key(commit.id, path), &bytes)?;
        }
        debug!(id = %commit.id, files = commit.added.len(), "captured snapshot");
        Ok(())
    }

    /// Writes raw snapshot bytes under the given commit id.
    ///
    /// Used when replicating a commit from another store, where the
    /// bytes arrive as a payload rather than from the working tree.
    pub fn install(&self, id: CommitId, files: &BTreeMap<String, Vec<u8>>) -> Result<()> {
        for (path, bytes) in files {
            self.inner.write_bytes(&Self::key(id, path), bytes)?;
        }
        Ok(())
    }

    /// Reads the bytes of `path` as of `commit`.
    ///
    /// Resolves provenance hops: a direct commit reads its own snapshot,
    /// anything else follows `provenance[path]` (chaining through
    /// replays of replays) to the commit that actually stored the bytes.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the path is not live in the commit or
    /// no provenance entry leads to stored bytes.
    pub fn read(&self, graph: &CommitGraph, commit: CommitId, path: &str) -> Result<Vec<u8>> {
        let mut cursor = graph
            .get(commit)
            .ok_or_else(|| GritError::UnknownCommit(commit.as_hex()))?;
        if !cursor.tracks(path) {
            return Err(GritError::FileNotFound(path.to_string()));
        }
        loop {
            if cursor.added.contains(path) && !cursor.is_replay() {
                return self.inner.read_bytes(&Self::key(cursor.id, path));
            }
            let owner = cursor
                .bytes_owner(path)
                .ok_or_else(|| GritError::FileNotFound(path.to_string()))?;
            if owner == cursor.id {
                // A direct commit owns its bytes; reaching here means the
                // snapshot was never captured.
                return Err(GritError::FileNotFound(path.to_string()));
            }
            cursor = graph
                .get(owner)
                .ok_or_else(|| GritError::FileNotFound(path.to_string()))?;
        }
    }

    /// Copies the resolved bytes of `path` at `commit` into the working
    /// tree under `dest` (which differs from `path` only for conflict
    /// files).
    pub fn restore(
        &self,
        graph: &CommitGraph,
        commit: CommitId,
        path: &str,
        dest: &str,
        working: &dyn FileStore,
    ) -> Result<()> {
        let bytes = self.read(graph, commit, path)?;
        working.write_bytes(dest, &bytes)
    }

    /// Restores every live file of `commit` into the working tree.
    pub fn restore_all(
        &self,
        graph: &CommitGraph,
        commit: CommitId,
        working: &dyn FileStore,
    ) -> Result<()> {
        let all_files = graph
            .get(commit)
            .ok_or_else(|| GritError::UnknownCommit(commit.as_hex()))?
            .all_files
            .clone();
        for path in &all_files {
            self.restore(graph, commit, path, path, working)?;
        }
        Ok(())
    }

    /// Collects the snapshot bytes of a commit's staged paths, resolved
    /// through provenance, as a payload for cross-store replication.
    pub fn export(
        &self,
        graph: &CommitGraph,
        commit: CommitId,
    ) -> Result<BTreeMap<String, Vec<u8>>> {
        let added = graph
            .get(commit)
            .ok_or_else(|| GritError::UnknownCommit(commit.as_hex()))?
            .added
            .clone();
        let mut files = BTreeMap::new();
        for path in added {
            let bytes = self.read(graph, commit, &path)?;
            files.insert(path, bytes);
        }
        Ok(files)
    }
}
