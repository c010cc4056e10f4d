use crate::harness::Scenario;
use grit_core::ReplayDecision;

#[test]
fn test_rebase_already_up_to_date() {
    // The target head is an ancestor of the current head, so there is
    // nothing to move.
    Scenario::new("rebase_already_up_to_date")
        .writes_and_adds("a.txt", b"base")
        .commits("base")
        .branches("behind")
        .writes_and_adds("a.txt", b"ahead")
        .commits("ahead")
        .rebases("behind")
        .assert_head_message("ahead")
        .assert_commit_count(3)
        .run()
        .expect("scenario should pass");
}

#[test]
fn test_rebase_fast_forward_creates_no_commits() {
    Scenario::new("rebase_fast_forward")
        .writes_and_adds("a.txt", b"base")
        .commits("base")
        .branches("feature")
        .checks_out("feature")
        .writes_and_adds("a.txt", b"feature work")
        .commits("feature work")
        .checks_out("master")
        .rebases("feature")
        .assert_head_message("feature work")
        .assert_file("a.txt", b"feature work")
        .assert_commit_count(3) // base setup only, nothing replayed
        .run()
        .unwrap();
}

#[test]
fn test_rebase_replays_divergent_commits() {
    Scenario::new("rebase_replays_divergent")
        .writes_and_adds("base.txt", b"base")
        .commits("base")
        .branches("feature")
        .writes_and_adds("master.txt", b"m")
        .commits("master work")
        .checks_out("feature")
        .writes_and_adds("one.txt", b"1")
        .commits("feature one")
        .writes_and_adds("two.txt", b"2")
        .commits("feature two")
        .rebases("master")
        // Replayed copies carry the original messages and all files
        // from both sides land in the working tree.
        .assert_head_message("feature two")
        .assert_file("master.txt", b"m")
        .assert_file("one.txt", b"1")
        .assert_file("two.txt", b"2")
        .run()
        .unwrap();
}

#[test]
fn test_interactive_rebase_reword() {
    Scenario::new("interactive_rebase_reword")
        .writes_and_adds("base.txt", b"base")
        .commits("base")
        .branches("feature")
        .writes_and_adds("master.txt", b"m")
        .commits("master work")
        .checks_out("feature")
        .writes_and_adds("one.txt", b"1")
        .commits("feature one")
        .rebases_with(
            "master",
            vec![ReplayDecision::Reword("feature one, reworded".to_string())],
        )
        .assert_head_message("feature one, reworded")
        .assert_file("one.txt", b"1")
        .run()
        .unwrap();
}

#[test]
fn test_interactive_rebase_skip_middle_commit() {
    Scenario::new("interactive_rebase_skip")
        .writes_and_adds("base.txt", b"base")
        .commits("base")
        .branches("feature")
        .writes_and_adds("master.txt", b"m")
        .commits("master work")
        .checks_out("feature")
        .writes_and_adds("one.txt", b"1")
        .commits("feature one")
        .writes_and_adds("two.txt", b"2")
        .commits("feature two")
        .writes_and_adds("three.txt", b"3")
        .commits("feature three")
        .rebases_with(
            "master",
            vec![
                ReplayDecision::Keep,
                ReplayDecision::Drop,
                ReplayDecision::Keep,
            ],
        )
        // The middle commit is suppressed; the walk stays linear.
        .assert_head_message("feature three")
        .assert_file("one.txt", b"1")
        .assert_file("three.txt", b"3")
        .run()
        .unwrap();
}

#[test]
fn test_interactive_rebase_cannot_drop_endpoints() {
    // Dropping the first or last commit of the sequence is downgraded
    // to keeping it.
    Scenario::new("interactive_rebase_drop_endpoints")
        .writes_and_adds("base.txt", b"base")
        .commits("base")
        .branches("feature")
        .writes_and_adds("master.txt", b"m")
        .commits("master work")
        .checks_out("feature")
        .writes_and_adds("one.txt", b"1")
        .commits("feature one")
        .writes_and_adds("two.txt", b"2")
        .commits("feature two")
        .rebases_with(
            "master",
            vec![ReplayDecision::Drop, ReplayDecision::Drop],
        )
        .assert_head_message("feature two")
        .assert_file("one.txt", b"1")
        .assert_file("two.txt", b"2")
        .run()
        .unwrap();
}
