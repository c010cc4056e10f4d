//! Error types for grit_core operations.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for grit_core operations.
///
/// Every variant carries the user-facing message printed by the CLI.
/// "Already up-to-date" is deliberately absent: it is a no-op success,
/// reported through the outcome enums of the operations that can hit it.
#[derive(Error, Debug)]
pub enum GritError {
    /// No branch with the given name exists.
    #[error("A branch with that name does not exist.")]
    UnknownBranch(String),

    /// A branch with the given name already exists.
    #[error("A branch with that name already exists.")]
    DuplicateBranch(String),

    /// The active branch cannot be removed.
    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrent(String),

    /// A branch cannot be merged with itself.
    #[error("Cannot merge a branch with itself.")]
    SelfMerge(String),

    /// A branch cannot be rebased onto itself.
    #[error("Cannot rebase a branch onto itself.")]
    SelfRebase(String),

    /// The remote head is not an ancestor of the local head.
    #[error("Please pull down remote changes before pushing.")]
    NeedsPull,

    /// The file is absent from the working tree or the named commit.
    #[error("File does not exist: {0}")]
    FileNotFound(String),

    /// Nothing is staged or marked for removal.
    #[error("No changes added to the commit.")]
    NoChangesStaged,

    /// The commit message is empty.
    #[error("Please enter a commit message.")]
    EmptyMessage,

    /// The file is byte-identical to the version in the head commit.
    #[error("File has not been modified since the last commit.")]
    FileUnmodified(String),

    /// The file is neither tracked by the head commit nor staged.
    #[error("No reason to remove the file.")]
    NoReasonToRemove(String),

    /// No commit with the given identifier exists.
    #[error("No commit with that id exists.")]
    UnknownCommit(String),

    /// Checking out the branch that is already active.
    #[error("No need to checkout the current branch.")]
    CheckoutCurrent(String),

    /// No remote with the given name is registered.
    #[error("A remote with that name does not exist.")]
    UnknownRemote(String),

    /// A remote with the given name is already registered.
    #[error("A remote with that name already exists.")]
    DuplicateRemote(String),

    /// The remote repository does not have the requested branch.
    #[error("That remote does not have that branch.")]
    RemoteMissingBranch(String),

    /// The transport collaborator could not reach the remote.
    #[error("Remote is unavailable: {0}")]
    RemoteUnavailable(String),

    /// A repository already exists at the target directory.
    #[error("A grit version control system already exists in the current directory.")]
    RepositoryExists,

    /// The directory does not contain a repository.
    #[error("Not a grit repository: {}", path.display())]
    NotARepository {
        /// Directory that was probed for `.grit`.
        path: PathBuf,
    },

    /// The repository state file is locked by another process.
    #[error("Repository is locked by another process.")]
    RepositoryLocked,

    /// The persisted state blob could not be encoded or decoded.
    #[error("state serialization error: {0}")]
    Serialization(String),

    /// Configuration could not be loaded or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid hex string for CommitId parsing.
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for grit_core operations.
pub type Result<T> = std::result::Result<T, GritError>;
