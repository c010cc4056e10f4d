//! Grit Core Library
//!
//! A single-user, local-first version control engine, providing:
//! - Whole-file commit snapshots with provenance tracking
//! - Branching, checkout, reset, and ancestry queries
//! - Three-way merge resolved at file granularity
//! - Rebase with replay, skip, and reword
//! - Push, pull, and clone between whole repository stores
//!
//! # Quick Start
//!
//! ```
//! use grit_core::Repository;
//! use tempfile::TempDir;
//!
//! let tmp = TempDir::new().unwrap();
//! let mut repo = Repository::init(tmp.path()).unwrap();
//!
//! // Stage and commit a file
//! std::fs::write(tmp.path().join("notes.txt"), "hello").unwrap();
//! repo.add("notes.txt").unwrap();
//! repo.commit("add notes").unwrap();
//!
//! // The initial commit plus ours
//! assert_eq!(repo.log().unwrap().len(), 2);
//! ```
//!
//! # Design
//!
//! Commit identities are salted hashes, not content addresses: two
//! commits with identical trees are still distinct commits. A commit
//! records only the paths staged or removed against its parent;
//! unchanged bytes are reached through a provenance map pointing at the
//! commit that last captured them. The whole repository state is one
//! postcard blob, compressed with zstd and swapped in atomically, with
//! an advisory file lock guarding concurrent opens.
//!
//! Remote operations materialize the other store locally and reconcile
//! the two commit graphs directly; commits keep their identity across
//! stores, so ancestry checks work between them.

mod commit;
mod commit_id;
mod config;
mod error;
mod fs;
mod graph;
mod merge;
mod rebase;
mod reconcile;
mod refs;
mod remote;
mod repo;
mod snapshot;
mod state;

pub use commit::{Commit, CommitKind};
pub use commit_id::CommitId;
pub use config::{Config, MergeConfig, RepositoryConfig};
pub use error::{GritError, Result};
pub use fs::{FileStore, OsFileStore};
pub use graph::{split_point_between, CommitGraph, CommitPayload};
pub use merge::MergeReport;
pub use rebase::{KeepAll, RebaseOutcome, ReplayDecision, ReplayOperator};
pub use reconcile::{PullOutcome, PushOutcome};
pub use refs::RefIndex;
pub use remote::{LocalTransport, RemoteRegistry, RemoteSpec, Transport};
pub use repo::{Repository, StatusReport};
pub use snapshot::SnapshotStore;
pub use state::{RepositoryState, StateLock};
