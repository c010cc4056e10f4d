//! Repository configuration.

use crate::error::{GritError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Repository configuration, stored as `.grit/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Repository-level settings.
    #[serde(default)]
    pub repository: RepositoryConfig,
    /// Merge behavior settings.
    #[serde(default)]
    pub merge: MergeConfig,
}

/// `[repository]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// On-disk format version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Branch a fresh repository starts on.
    #[serde(default = "default_branch")]
    pub default_branch: String,
}

/// `[merge]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Suffix appended to the path of a conflicting file.
    #[serde(default = "default_conflict_suffix")]
    pub conflict_suffix: String,
}

fn default_version() -> String {
    "1".to_string()
}

fn default_branch() -> String {
    "master".to_string()
}

fn default_conflict_suffix() -> String {
    ".conflicted".to_string()
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            default_branch: default_branch(),
        }
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            conflict_suffix: default_conflict_suffix(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file, using defaults if absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| GritError::Config(e.to_string()))
    }

    /// Writes configuration as TOML.
    pub fn store(&self, path: &Path) -> Result<()> {
        let raw = toml::to_string_pretty(self).map_err(|e| GritError::Config(e.to_string()))?;
        fs::write(path, raw)?;
        Ok(())
    }
}
