use crate::harness::TestWorkspace;
use anyhow::Result;
use grit_core::{LocalTransport, PullOutcome, PushOutcome, Repository};
use std::fs;
use std::path::Path;

fn location(workspace: &TestWorkspace) -> String {
    workspace.path().to_str().expect("utf-8 temp path").to_string()
}

fn commit_file(repo: &mut Repository, root: &Path, path: &str, bytes: &[u8], message: &str) -> Result<()> {
    fs::write(root.join(path), bytes)?;
    repo.add(path)?;
    repo.commit(message)?;
    Ok(())
}

/// Clones the shared remote and registers it as "origin" in the clone.
fn clone_from(remote: &TestWorkspace, name: &str) -> Result<(TestWorkspace, Repository)> {
    let workspace = TestWorkspace::empty()?;
    let mut seed = workspace.init_repo()?;
    seed.add_remote(name, "tester@local", &location(remote))?;
    let dest = seed.clone_remote(name, &LocalTransport)?;
    drop(seed);

    let mut clone = Repository::open(&dest)?;
    clone.add_remote(name, "tester@local", &location(remote))?;
    // The outer workspace owns the temp dir the clone lives in.
    Ok((workspace, clone))
}

#[test]
fn test_push_then_pull_moves_commits_between_clones() {
    let remote = TestWorkspace::empty().unwrap();
    drop(remote.init_repo().unwrap());

    let (_keep_a, mut publisher) = clone_from(&remote, "origin").unwrap();
    let (_keep_b, mut subscriber) = clone_from(&remote, "origin").unwrap();

    let publisher_root = publisher.root().to_path_buf();
    commit_file(&mut publisher, &publisher_root, "a.txt", b"published", "publish a").unwrap();
    let outcome = publisher.push("origin", "master", &LocalTransport).unwrap();
    assert_eq!(outcome, PushOutcome::Pushed(1));

    let outcome = subscriber.pull("origin", "master", &LocalTransport).unwrap();
    assert_eq!(outcome, PullOutcome::FastForwarded(1));
    assert_eq!(subscriber.head_id().unwrap(), publisher.head_id().unwrap());
    assert_eq!(
        fs::read(subscriber.root().join("a.txt")).unwrap(),
        b"published"
    );
}

#[test]
fn test_push_requires_pull_after_remote_moved() {
    let remote = TestWorkspace::empty().unwrap();
    drop(remote.init_repo().unwrap());

    let (_keep_a, mut first) = clone_from(&remote, "origin").unwrap();
    let (_keep_b, mut second) = clone_from(&remote, "origin").unwrap();

    let first_root = first.root().to_path_buf();
    commit_file(&mut first, &first_root, "a.txt", b"first", "first wins").unwrap();
    first.push("origin", "master", &LocalTransport).unwrap();

    let second_root = second.root().to_path_buf();
    commit_file(&mut second, &second_root, "b.txt", b"second", "second tries").unwrap();
    let err = second.push("origin", "master", &LocalTransport).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Please pull down remote changes before pushing."
    );

    // Pulling reconciles by replaying the local commit on top, after
    // which the push goes through.
    let outcome = second.pull("origin", "master", &LocalTransport).unwrap();
    assert_eq!(outcome, PullOutcome::Rebased { adopted: 1 });
    assert_eq!(fs::read(second.root().join("a.txt")).unwrap(), b"first");
    assert_eq!(fs::read(second.root().join("b.txt")).unwrap(), b"second");

    let outcome = second.push("origin", "master", &LocalTransport).unwrap();
    assert!(matches!(outcome, PushOutcome::Pushed(_)));
}

#[test]
fn test_clone_restores_remote_head_working_files() {
    let remote = TestWorkspace::empty().unwrap();
    drop(remote.init_repo().unwrap());

    let (_keep, mut publisher) = clone_from(&remote, "origin").unwrap();
    let publisher_root = publisher.root().to_path_buf();
    commit_file(&mut publisher, &publisher_root, "a.txt", b"cloned", "add a").unwrap();
    publisher.push("origin", "master", &LocalTransport).unwrap();

    let (_keep2, clone) = clone_from(&remote, "origin").unwrap();
    assert_eq!(fs::read(clone.root().join("a.txt")).unwrap(), b"cloned");
    assert_eq!(clone.head_id().unwrap(), publisher.head_id().unwrap());
}

#[test]
fn test_pull_missing_branch_fails_without_changes() {
    let remote = TestWorkspace::empty().unwrap();
    drop(remote.init_repo().unwrap());

    let (_keep, mut local) = clone_from(&remote, "origin").unwrap();
    local.branch("topic").unwrap();
    local.checkout_branch("topic").unwrap();

    let err = local.pull("origin", "topic", &LocalTransport).unwrap_err();
    assert_eq!(err.to_string(), "That remote does not have that branch.");
}

#[test]
fn test_push_creates_branch_on_remote() {
    let remote = TestWorkspace::empty().unwrap();
    drop(remote.init_repo().unwrap());

    let (_keep, mut local) = clone_from(&remote, "origin").unwrap();
    local.branch("topic").unwrap();
    local.checkout_branch("topic").unwrap();
    let local_root = local.root().to_path_buf();
    commit_file(&mut local, &local_root, "t.txt", b"topic", "topic work").unwrap();

    let outcome = local.push("origin", "topic", &LocalTransport).unwrap();
    assert_eq!(outcome, PushOutcome::Pushed(1));
    drop(local);

    let remote_repo = remote.open_repo().unwrap();
    assert!(remote_repo.refs().contains("topic"));
    assert!(remote_repo.refs().head("topic").is_some());
}
