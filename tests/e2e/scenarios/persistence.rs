use crate::harness::{Scenario, TestWorkspace};
use grit_core::GritError;

#[test]
fn test_state_survives_reopen() {
    Scenario::new("state_survives_reopen")
        .writes_and_adds("a.txt", b"kept")
        .commits("first")
        .branches("feature")
        .writes_and_adds("b.txt", b"staged but not committed")
        .reopens()
        .assert_head_message("first")
        .assert_current_branch("master")
        .assert(crate::harness::Assertion::BranchExists("feature".to_string()))
        .assert(crate::harness::Assertion::Staged {
            path: "b.txt".to_string(),
        })
        .run()
        .expect("scenario should pass");
}

#[test]
fn test_working_set_clears_only_on_commit() {
    Scenario::new("working_set_clears_on_commit")
        .writes_and_adds("a.txt", b"1")
        .reopens()
        .commits("add a")
        .reopens()
        .assert_staged_empty()
        .assert_head_tracks("a.txt")
        .run()
        .unwrap();
}

#[test]
fn test_second_open_is_locked_out() {
    let workspace = TestWorkspace::empty().unwrap();
    let first = workspace.init_repo().unwrap();

    let second = workspace.open_repo();
    let err = second.expect_err("second open must fail while the lock is held");
    let err = err.downcast::<GritError>().unwrap();
    assert!(matches!(err, GritError::RepositoryLocked));

    drop(first);
    workspace.open_repo().expect("lock released on drop");
}
