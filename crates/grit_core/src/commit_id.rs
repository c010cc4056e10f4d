//! Commit identification.

use crate::error::{GritError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A 32-byte BLAKE3 digest identifying a commit.
///
/// CommitIds are an *identity* scheme, not content addressing: the digest
/// covers the commit message, creation timestamp, parent identifier,
/// zero-padded sequence number, and a random salt. Two commits with
/// identical content made at different times get different identifiers,
/// and the same working tree committed twice is two distinct commits.
/// Equality and hashing of commits are defined entirely by this value.
///
/// # Examples
///
/// ```
/// use grit_core::CommitId;
///
/// let id = CommitId::from_bytes([0xab; 32]);
/// assert_eq!(id.as_hex().len(), 64);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CommitId([u8; 32]);

impl CommitId {
    /// The length of a CommitId as a hex string.
    pub const HEX_LEN: usize = 64;

    /// Creates a CommitId from raw bytes.
    #[inline]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the underlying 32-byte digest.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns this CommitId as a lowercase hex string.
    pub fn as_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses a CommitId from a hex string.
    ///
    /// # Errors
    ///
    /// Returns `GritError::InvalidHex` if the string is not valid hex
    /// or is not exactly 64 characters long.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() != Self::HEX_LEN {
            return Err(GritError::InvalidHex(format!(
                "expected {} hex chars, got {}",
                Self::HEX_LEN,
                s.len()
            )));
        }

        let bytes = hex::decode(s).map_err(|e| GritError::InvalidHex(e.to_string()))?;

        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| GritError::InvalidHex("invalid length".to_string()))?;

        Ok(Self(arr))
    }

    /// Mints a fresh identifier for a new commit.
    ///
    /// The digest input is `message || timestamp || parent-hex ||
    /// zero-padded sequence number || random salt`. The salt guarantees
    /// negligible collision probability without tying identity to content.
    pub fn mint(message: &str, timestamp: i64, parent: Option<&CommitId>, seq: u64) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(message.as_bytes());
        hasher.update(timestamp.to_le_bytes().as_slice());
        if let Some(parent) = parent {
            hasher.update(parent.as_bytes());
        }
        hasher.update(format!("{:08}", seq).as_bytes());
        hasher.update(Uuid::new_v4().as_bytes());
        Self(*hasher.finalize().as_bytes())
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_hex())
    }
}

impl fmt::Debug for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitId({}...)", &self.as_hex()[..12])
    }
}
