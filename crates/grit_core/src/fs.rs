//! The file-store collaborator boundary.
//!
//! The content store and working-tree restores depend on this
//! capability, not on a specific I/O mechanism.

use crate::error::{GritError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Byte-level file access, addressed by relative path.
pub trait FileStore {
    /// Reads the full contents of a file.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the path is absent.
    fn read_bytes(&self, path: &str) -> Result<Vec<u8>>;

    /// Writes the full contents of a file, creating parent directories.
    fn write_bytes(&self, path: &str, bytes: &[u8]) -> Result<()>;

    /// True if the path exists.
    fn exists(&self, path: &str) -> bool;

    /// True if both paths exist and hold identical bytes.
    fn equals_by_content(&self, path_a: &str, path_b: &str) -> bool {
        match (self.read_bytes(path_a), self.read_bytes(path_b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

/// File store over the real filesystem, rooted at a directory.
#[derive(Debug, Clone)]
pub struct OsFileStore {
    root: PathBuf,
}

impl OsFileStore {
    /// Creates a store whose relative paths resolve under `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl FileStore for OsFileStore {
    fn read_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.resolve(path);
        if !full.exists() {
            return Err(GritError::FileNotFound(path.to_string()));
        }
        Ok(fs::read(full)?)
    }

    fn write_bytes(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(full, bytes)?;
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }
}
