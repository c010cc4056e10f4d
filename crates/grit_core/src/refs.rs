//! Branch reference bookkeeping.

use crate::error::{GritError, Result};
use crate::CommitId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Name→commit and commit→name indices plus the active branch.
///
/// `branches_at` is the inverse of `head_of`, but a head update does not
/// scrub the branch out of its previous commit's entry: stale membership
/// is tolerated because every lookup goes through `head_of`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefIndex {
    head_of: BTreeMap<String, CommitId>,
    branches_at: HashMap<CommitId, BTreeSet<String>>,
    current: String,
}

impl RefIndex {
    /// Creates an index with the given active branch and no heads yet.
    pub fn new(current_branch: &str) -> Self {
        Self {
            head_of: BTreeMap::new(),
            branches_at: HashMap::new(),
            current: current_branch.to_string(),
        }
    }

    /// The active branch name.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Switches the active branch. The caller validates existence.
    pub fn set_current(&mut self, branch: &str) {
        self.current = branch.to_string();
    }

    /// The head of the given branch.
    pub fn head(&self, branch: &str) -> Option<CommitId> {
        self.head_of.get(branch).copied()
    }

    /// The head of the given branch, or `UnknownBranch`.
    pub fn require_head(&self, branch: &str) -> Result<CommitId> {
        self.head(branch)
            .ok_or_else(|| GritError::UnknownBranch(branch.to_string()))
    }

    /// True if a branch with this name exists.
    pub fn contains(&self, branch: &str) -> bool {
        self.head_of.contains_key(branch)
    }

    /// Moves (or creates) a branch head, keeping the inverse index in step.
    pub fn set_head(&mut self, branch: &str, commit: CommitId) {
        self.head_of.insert(branch.to_string(), commit);
        self.branches_at
            .entry(commit)
            .or_default()
            .insert(branch.to_string());
    }

    /// Registers a new branch pointing at `at`.
    ///
    /// Branching does not itself move the working tree or switch the
    /// active branch.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateBranch` if the name is already taken.
    pub fn create_branch(&mut self, name: &str, at: CommitId) -> Result<()> {
        if self.contains(name) {
            return Err(GritError::DuplicateBranch(name.to_string()));
        }
        self.set_head(name, at);
        Ok(())
    }

    /// Deletes a branch in both directions.
    ///
    /// # Errors
    ///
    /// Returns `CannotRemoveCurrent` for the active branch and
    /// `UnknownBranch` if the name is absent.
    pub fn remove_branch(&mut self, name: &str) -> Result<()> {
        if name == self.current {
            return Err(GritError::CannotRemoveCurrent(name.to_string()));
        }
        let head = self
            .head_of
            .remove(name)
            .ok_or_else(|| GritError::UnknownBranch(name.to_string()))?;
        if let Some(names) = self.branches_at.get_mut(&head) {
            names.remove(name);
        }
        Ok(())
    }

    /// All branch names, sorted.
    pub fn branch_names(&self) -> Vec<String> {
        self.head_of.keys().cloned().collect()
    }

    /// Branch names currently recorded at the commit.
    ///
    /// May contain stale entries for branches whose heads have since
    /// moved; cross-check against `head` when freshness matters.
    pub fn branches_at(&self, commit: CommitId) -> Vec<String> {
        self.branches_at
            .get(&commit)
            .map(|names| names.iter().cloned().collect())
            .unwrap_or_default()
    }
}
