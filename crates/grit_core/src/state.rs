//! Whole-repository state persistence.
//!
//! The commit graph, reference index, working set, and remote registry
//! are persisted as one postcard-encoded, zstd-compressed blob, loaded
//! at process start and saved at process end. An advisory exclusive
//! lock guards the load/mutate/save window; the format itself assumes
//! a single writer.

use crate::error::{GritError, Result};
use crate::graph::CommitGraph;
use crate::refs::RefIndex;
use crate::remote::RemoteRegistry;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Zstd compression level for the state blob.
const COMPRESSION_LEVEL: i32 = 3;

/// Everything a repository persists between invocations.
#[derive(Debug, Serialize, Deserialize)]
pub struct RepositoryState {
    /// The commit arena and its indices.
    pub graph: CommitGraph,
    /// Branch heads and the active branch.
    pub refs: RefIndex,
    /// Paths staged for the next commit.
    pub staged: BTreeSet<String>,
    /// Paths marked for removal in the next commit.
    pub pending_removal: BTreeSet<String>,
    /// Named remotes.
    pub remotes: RemoteRegistry,
}

/// Serializes and writes the state blob atomically.
///
/// Temp file + fsync + rename, like every other durable write here.
pub fn save(path: &Path, state: &RepositoryState) -> Result<()> {
    let encoded =
        postcard::to_allocvec(state).map_err(|e| GritError::Serialization(e.to_string()))?;
    let compressed = zstd::encode_all(encoded.as_slice(), COMPRESSION_LEVEL)
        .map_err(|e| GritError::Serialization(e.to_string()))?;

    let tmp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(&compressed)?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;

    #[cfg(unix)]
    {
        if let Some(parent) = path.parent() {
            if let Ok(dir_file) = File::open(parent) {
                let _ = dir_file.sync_all();
            }
        }
    }

    Ok(())
}

/// Reads and decodes the state blob.
pub fn load(path: &Path) -> Result<RepositoryState> {
    let compressed = fs::read(path)?;
    let encoded = zstd::decode_all(compressed.as_slice())
        .map_err(|e| GritError::Serialization(e.to_string()))?;
    postcard::from_bytes(&encoded).map_err(|e| GritError::Serialization(e.to_string()))
}

/// Advisory exclusive lock on the repository, held for the lifetime of
/// an open handle.
#[derive(Debug)]
pub struct StateLock {
    file: File,
}

impl StateLock {
    /// Acquires the lock, failing fast if another process holds it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryLocked` when the lock is already taken.
    pub fn acquire(lock_path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(lock_path)?;
        file.try_lock_exclusive()
            .map_err(|_| GritError::RepositoryLocked)?;
        Ok(Self { file })
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
