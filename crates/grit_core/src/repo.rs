//! Repository handle providing the main grit API.

use crate::commit::{Commit, CommitKind};
use crate::config::Config;
use crate::error::{GritError, Result};
use crate::fs::{FileStore, OsFileStore};
use crate::graph::CommitGraph;
use crate::merge::{self, MergeReport};
use crate::rebase::{self, KeepAll, RebaseOutcome, ReplayOperator};
use crate::reconcile::{self, PullOutcome, PushOutcome};
use crate::refs::RefIndex;
use crate::remote::{copy_tree, Transport};
use crate::snapshot::SnapshotStore;
use crate::state::{self, RepositoryState, StateLock};
use crate::CommitId;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

/// Snapshot of branch and working-set bookkeeping for `status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// The active branch.
    pub current_branch: String,
    /// All branch names, sorted.
    pub branches: Vec<String>,
    /// Paths staged for the next commit.
    pub staged: Vec<String>,
    /// Paths marked for removal in the next commit.
    pub pending_removal: Vec<String>,
}

/// grit repository handle.
///
/// Owns the full in-memory state for the duration of one operation and
/// persists it as a single blob via [`save`](Repository::save). The
/// advisory lock taken at open is held until the handle drops.
#[derive(Debug)]
pub struct Repository {
    root: PathBuf,
    config: Config,
    pub(crate) state: RepositoryState,
    pub(crate) snapshots: SnapshotStore,
    pub(crate) working: OsFileStore,
    _lock: StateLock,
}

pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before Unix epoch")
        .as_secs() as i64
}

impl Repository {
    /// Initializes a new repository at `path` and creates the initial
    /// commit on the default branch.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryExists` if a `.grit` directory is already there.
    pub fn init(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        let grit_dir = root.join(".grit");
        if grit_dir.exists() {
            return Err(GritError::RepositoryExists);
        }

        fs::create_dir_all(grit_dir.join("objects"))?;
        let config = Config::default();
        config.store(&grit_dir.join("config.toml"))?;
        let lock = StateLock::acquire(&grit_dir.join("LOCK"))?;

        let mut graph = CommitGraph::new();
        let mut refs = RefIndex::new(&config.repository.default_branch);
        let branch = config.repository.default_branch.clone();
        let root_commit = graph.create(
            None,
            &branch,
            "initial commit",
            unix_now(),
            BTreeSet::new(),
            BTreeSet::new(),
            None,
            CommitKind::Normal,
        );
        refs.set_head(&branch, root_commit);

        let repo = Self {
            snapshots: SnapshotStore::new(grit_dir.join("objects")),
            working: OsFileStore::new(&root),
            state: RepositoryState {
                graph,
                refs,
                staged: BTreeSet::new(),
                pending_removal: BTreeSet::new(),
                remotes: Default::default(),
            },
            config,
            root,
            _lock: lock,
        };
        repo.save()?;
        info!(root = %repo.root.display(), "initialized repository");
        Ok(repo)
    }

    /// Opens an existing repository.
    ///
    /// # Errors
    ///
    /// Returns `NotARepository` if `path` has no `.grit` directory and
    /// `RepositoryLocked` if another process holds the lock.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        let grit_dir = root.join(".grit");
        if !grit_dir.exists() {
            return Err(GritError::NotARepository { path: root });
        }

        let lock = StateLock::acquire(&grit_dir.join("LOCK"))?;
        let config = Config::load(&grit_dir.join("config.toml"))?;
        let state = state::load(&grit_dir.join("state.bin"))?;

        Ok(Self {
            snapshots: SnapshotStore::new(grit_dir.join("objects")),
            working: OsFileStore::new(&root),
            state,
            config,
            root,
            _lock: lock,
        })
    }

    /// Persists the whole repository state.
    pub fn save(&self) -> Result<()> {
        state::save(&self.grit_dir().join("state.bin"), &self.state)
    }

    /// The repository root (parent of `.grit`).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `.grit` directory.
    pub fn grit_dir(&self) -> PathBuf {
        self.root.join(".grit")
    }

    /// The commit graph.
    pub fn graph(&self) -> &CommitGraph {
        &self.state.graph
    }

    /// The branch reference index.
    pub fn refs(&self) -> &RefIndex {
        &self.state.refs
    }

    /// The active branch name.
    pub fn current_branch(&self) -> &str {
        self.state.refs.current()
    }

    /// The head commit of the active branch.
    pub fn head_id(&self) -> Result<CommitId> {
        self.state.refs.require_head(self.state.refs.current())
    }

    fn head(&self) -> Result<&Commit> {
        let id = self.head_id()?;
        self.state
            .graph
            .get(id)
            .ok_or_else(|| GritError::UnknownCommit(id.as_hex()))
    }

    /// Stages a file for the next commit.
    ///
    /// Adding a file that is marked for removal only unmarks it. Adding
    /// a file byte-identical to the head's version is rejected.
    ///
    /// # Errors
    ///
    /// `FileNotFound` if the path is absent from the working tree,
    /// `FileUnmodified` if it matches the committed version.
    pub fn add(&mut self, path: &str) -> Result<()> {
        if !self.working.exists(path) {
            return Err(GritError::FileNotFound(path.to_string()));
        }
        if self.state.pending_removal.remove(path) {
            return Ok(());
        }
        let head = self.head()?;
        if head.tracks(path) {
            let committed = self.snapshots.read(&self.state.graph, head.id, path)?;
            let working = self.working.read_bytes(path)?;
            if committed == working {
                return Err(GritError::FileUnmodified(path.to_string()));
            }
        }
        self.state.staged.insert(path.to_string());
        Ok(())
    }

    /// Marks a file for removal in the next commit.
    ///
    /// Removing a staged file only unstages it.
    ///
    /// # Errors
    ///
    /// `NoReasonToRemove` if the path is neither tracked nor staged.
    pub fn remove(&mut self, path: &str) -> Result<()> {
        if self.state.staged.remove(path) {
            return Ok(());
        }
        if !self.head()?.tracks(path) {
            return Err(GritError::NoReasonToRemove(path.to_string()));
        }
        self.state.pending_removal.insert(path.to_string());
        Ok(())
    }

    /// Creates a commit from the working set and clears it.
    ///
    /// # Errors
    ///
    /// `EmptyMessage` for an empty message, `NoChangesStaged` when
    /// nothing is staged or marked for removal.
    pub fn commit(&mut self, message: &str) -> Result<CommitId> {
        if message.is_empty() {
            return Err(GritError::EmptyMessage);
        }
        if self.state.staged.is_empty() && self.state.pending_removal.is_empty() {
            return Err(GritError::NoChangesStaged);
        }
        let parent = self.head_id()?;
        let branch = self.state.refs.current().to_string();
        let added = std::mem::take(&mut self.state.staged);
        let removed = std::mem::take(&mut self.state.pending_removal);
        let id = self.state.graph.create(
            Some(parent),
            &branch,
            message,
            unix_now(),
            added,
            removed,
            None,
            CommitKind::Normal,
        );
        let created = self
            .state
            .graph
            .get(id)
            .ok_or_else(|| GritError::UnknownCommit(id.as_hex()))?;
        self.snapshots.capture(created, &self.working)?;
        self.state.refs.set_head(&branch, id);
        info!(id = %id, branch, "committed");
        Ok(id)
    }

    /// History of the active branch, newest first.
    pub fn log(&self) -> Result<Vec<&Commit>> {
        let mut entries = Vec::new();
        let mut cursor = Some(self.head_id()?);
        while let Some(id) = cursor {
            if let Some(commit) = self.state.graph.get(id) {
                entries.push(commit);
            }
            cursor = self.state.graph.effective_parent(id);
        }
        Ok(entries)
    }

    /// Every commit ever created, oldest first.
    pub fn global_log(&self) -> Vec<&Commit> {
        self.state.graph.iter_commits().collect()
    }

    /// Ids of all commits with the exact message.
    pub fn find(&self, message: &str) -> Vec<CommitId> {
        self.state.graph.find_by_message(message)
    }

    /// Branch and working-set bookkeeping.
    pub fn status(&self) -> StatusReport {
        StatusReport {
            current_branch: self.state.refs.current().to_string(),
            branches: self.state.refs.branch_names(),
            staged: self.state.staged.iter().cloned().collect(),
            pending_removal: self.state.pending_removal.iter().cloned().collect(),
        }
    }

    /// Creates a branch at the current head without switching to it.
    pub fn branch(&mut self, name: &str) -> Result<()> {
        let head = self.head_id()?;
        self.state.refs.create_branch(name, head)
    }

    /// Removes a branch.
    pub fn remove_branch(&mut self, name: &str) -> Result<()> {
        self.state.refs.remove_branch(name)
    }

    /// Switches to a branch and restores its head's files.
    ///
    /// # Errors
    ///
    /// `CheckoutCurrent` for the active branch, `UnknownBranch` for an
    /// unknown name.
    pub fn checkout_branch(&mut self, name: &str) -> Result<()> {
        if name == self.state.refs.current() {
            return Err(GritError::CheckoutCurrent(name.to_string()));
        }
        let head = self.state.refs.require_head(name)?;
        self.state.refs.set_current(name);
        self.snapshots
            .restore_all(&self.state.graph, head, &self.working)
    }

    /// Restores one file from the current head into the working tree.
    pub fn checkout_file(&mut self, path: &str) -> Result<()> {
        let head = self.head_id()?;
        self.snapshots
            .restore(&self.state.graph, head, path, path, &self.working)
    }

    /// Restores one file from the given commit into the working tree.
    pub fn checkout_file_at(&mut self, commit: CommitId, path: &str) -> Result<()> {
        if !self.state.graph.contains(commit) {
            return Err(GritError::UnknownCommit(commit.as_hex()));
        }
        self.snapshots
            .restore(&self.state.graph, commit, path, path, &self.working)
    }

    /// Moves the current branch's head to an arbitrary existing commit
    /// and restores all of its files.
    pub fn reset(&mut self, commit: CommitId) -> Result<()> {
        if !self.state.graph.contains(commit) {
            return Err(GritError::UnknownCommit(commit.as_hex()));
        }
        self.snapshots
            .restore_all(&self.state.graph, commit, &self.working)?;
        let branch = self.state.refs.current().to_string();
        self.state.refs.set_head(&branch, commit);
        Ok(())
    }

    /// Merges another branch's head into the working files.
    ///
    /// Never creates a commit; the result must be committed separately.
    pub fn merge(&mut self, given_branch: &str) -> Result<MergeReport> {
        merge::merge(
            &self.state.graph,
            &self.snapshots,
            &self.working,
            &self.state.refs,
            given_branch,
            &self.config.merge.conflict_suffix,
        )
    }

    /// Rebases the current branch onto another branch's head.
    pub fn rebase(&mut self, target_branch: &str) -> Result<RebaseOutcome> {
        self.rebase_with(target_branch, &mut KeepAll)
    }

    /// Rebase consulting an operator per replayed commit (interactive).
    pub fn rebase_with(
        &mut self,
        target_branch: &str,
        operator: &mut dyn ReplayOperator,
    ) -> Result<RebaseOutcome> {
        let outcome = rebase::rebase(
            &mut self.state.graph,
            &mut self.state.refs,
            target_branch,
            operator,
            unix_now(),
        )?;
        if outcome != RebaseOutcome::AlreadyUpToDate {
            let head = self.head_id()?;
            self.snapshots
                .restore_all(&self.state.graph, head, &self.working)?;
        }
        Ok(outcome)
    }

    /// Registers a remote.
    pub fn add_remote(&mut self, name: &str, login: &str, location: &str) -> Result<()> {
        self.state.remotes.add(name, login, location)
    }

    /// Removes a remote.
    pub fn remove_remote(&mut self, name: &str) -> Result<()> {
        self.state.remotes.remove(name)
    }

    /// Registered remote names, sorted.
    pub fn remote_names(&self) -> Vec<String> {
        self.state.remotes.names()
    }

    /// Pushes new commits of `branch` to the named remote.
    ///
    /// Fetches the remote's whole state, reconciles, and publishes it
    /// back. On `NeedsPull` the remote is left untouched.
    pub fn push(
        &mut self,
        remote_name: &str,
        branch: &str,
        transport: &dyn Transport,
    ) -> Result<PushOutcome> {
        let location = self.state.remotes.get(remote_name)?.location.clone();
        let staging = self.staging_dir();
        let _ = fs::remove_dir_all(&staging);
        transport.fetch(&location, &staging)?;

        let result: Result<PushOutcome> = (|| {
            let mut remote = Repository::open(&staging)?;
            let outcome = reconcile::push_into(self, &mut remote, branch)?;
            remote.save()?;
            drop(remote);
            transport.publish(&location, &staging)?;
            Ok(outcome)
        })();
        let _ = fs::remove_dir_all(&staging);
        result
    }

    /// Pulls new commits of `branch` from the named remote.
    ///
    /// Divergent histories resolve as "local changes rebased onto
    /// remote", not a three-way merge.
    pub fn pull(
        &mut self,
        remote_name: &str,
        branch: &str,
        transport: &dyn Transport,
    ) -> Result<PullOutcome> {
        let location = self.state.remotes.get(remote_name)?.location.clone();
        let staging = self.staging_dir();
        let _ = fs::remove_dir_all(&staging);
        transport.fetch(&location, &staging)?;

        let result: Result<PullOutcome> = (|| {
            let remote = Repository::open(&staging)?;
            reconcile::pull_into(self, &remote, branch)
        })();
        let _ = fs::remove_dir_all(&staging);
        result
    }

    /// Clones the named remote into a fresh directory next to this
    /// repository's root, restoring the working files of the remote's
    /// current head only.
    pub fn clone_remote(&mut self, remote_name: &str, transport: &dyn Transport) -> Result<PathBuf> {
        let location = self.state.remotes.get(remote_name)?.location.clone();
        let staging = self.staging_dir();
        let _ = fs::remove_dir_all(&staging);
        transport.fetch(&location, &staging)?;

        let dest = self.root.join(remote_name);
        let result: Result<PathBuf> = (|| {
            copy_tree(&staging.join(".grit"), &dest.join(".grit"))?;
            let clone = Repository::open(&dest)?;
            let head = clone.head_id()?;
            clone
                .snapshots
                .restore_all(&clone.state.graph, head, &clone.working)?;
            info!(remote = remote_name, dest = %dest.display(), "cloned");
            Ok(dest.clone())
        })();
        let _ = fs::remove_dir_all(&staging);
        result
    }

    fn staging_dir(&self) -> PathBuf {
        self.grit_dir().join("remote-staging")
    }
}
