//! Remote registry and the transport collaborator boundary.
//!
//! A remote is a named pointer to another, separately persisted
//! repository. The transport moves whole repository roots between the
//! remote location and a local staging directory; there is no
//! incremental wire protocol.

use crate::error::{GritError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Where and how to reach a remote repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSpec {
    /// Login string, e.g. `user@host`.
    pub login: String,
    /// Repository root at the remote side.
    pub location: String,
}

/// Named remotes of a repository.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RemoteRegistry {
    remotes: BTreeMap<String, RemoteSpec>,
}

impl RemoteRegistry {
    /// Registers a remote.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateRemote` if the name is taken.
    pub fn add(&mut self, name: &str, login: &str, location: &str) -> Result<()> {
        if self.remotes.contains_key(name) {
            return Err(GritError::DuplicateRemote(name.to_string()));
        }
        self.remotes.insert(
            name.to_string(),
            RemoteSpec {
                login: login.to_string(),
                location: location.to_string(),
            },
        );
        Ok(())
    }

    /// Removes a remote.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRemote` if the name is absent.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        self.remotes
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| GritError::UnknownRemote(name.to_string()))
    }

    /// Looks up a remote.
    pub fn get(&self, name: &str) -> Result<&RemoteSpec> {
        self.remotes
            .get(name)
            .ok_or_else(|| GritError::UnknownRemote(name.to_string()))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.remotes.keys().cloned().collect()
    }
}

/// Whole-state exchange with a remote location.
///
/// `fetch` copies the entire repository root at `location` into the
/// staging directory; `publish` copies a staging directory back. A
/// failure surfaces as `RemoteUnavailable` and aborts the enclosing
/// operation.
pub trait Transport {
    /// Copies the remote repository root into `staging`.
    fn fetch(&self, location: &str, staging: &Path) -> Result<()>;

    /// Copies `staging` back over the remote repository root.
    fn publish(&self, location: &str, staging: &Path) -> Result<()>;
}

/// Transport for remotes that live on the local filesystem.
pub struct LocalTransport;

impl Transport for LocalTransport {
    fn fetch(&self, location: &str, staging: &Path) -> Result<()> {
        let src = Path::new(location);
        if !src.is_dir() {
            return Err(GritError::RemoteUnavailable(location.to_string()));
        }
        copy_tree(src, staging)
            .map_err(|e| GritError::RemoteUnavailable(format!("{location}: {e}")))
    }

    fn publish(&self, location: &str, staging: &Path) -> Result<()> {
        copy_tree(staging, Path::new(location))
            .map_err(|e| GritError::RemoteUnavailable(format!("{location}: {e}")))
    }
}

pub(crate) fn copy_tree(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
