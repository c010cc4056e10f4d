use crate::harness::Scenario;

#[test]
fn test_merge_disjoint_changes_restores_without_conflict() {
    Scenario::new("merge_disjoint_changes")
        .writes_and_adds("base.txt", b"base")
        .commits("base")
        .branches("feature")
        .writes_and_adds("ours.txt", b"ours")
        .commits("master adds ours")
        .checks_out("feature")
        .writes_and_adds("theirs.txt", b"theirs")
        .commits("feature adds theirs")
        .checks_out("master")
        .merges("feature")
        .assert_file("theirs.txt", b"theirs")
        .assert_file("ours.txt", b"ours")
        .assert_file("base.txt", b"base")
        .run()
        .expect("scenario should pass");
}

#[test]
fn test_merge_both_modified_writes_conflict_file() {
    Scenario::new("merge_both_modified")
        .writes_and_adds("shared.txt", b"base")
        .commits("base")
        .branches("feature")
        .writes_and_adds("shared.txt", b"master edit")
        .commits("master edits shared")
        .checks_out("feature")
        .writes_and_adds("shared.txt", b"feature edit")
        .commits("feature edits shared")
        .checks_out("master")
        .merges("feature")
        // The current version stays in place; the other side lands
        // next to it for manual resolution.
        .assert_file("shared.txt", b"master edit")
        .assert_file("shared.txt.conflicted", b"feature edit")
        .run()
        .unwrap();
}

#[test]
fn test_merge_only_given_side_modified() {
    Scenario::new("merge_only_given_modified")
        .writes_and_adds("shared.txt", b"base")
        .commits("base")
        .branches("feature")
        .checks_out("feature")
        .writes_and_adds("shared.txt", b"feature edit")
        .commits("feature edits shared")
        .checks_out("master")
        .merges("feature")
        .assert_file("shared.txt", b"feature edit")
        .run()
        .unwrap();
}

#[test]
fn test_merge_only_current_side_modified() {
    Scenario::new("merge_only_current_modified")
        .writes_and_adds("shared.txt", b"base")
        .commits("base")
        .branches("feature")
        .writes_and_adds("shared.txt", b"master edit")
        .commits("master edits shared")
        .merges("feature")
        .assert_file("shared.txt", b"master edit")
        .run()
        .unwrap();
}

#[test]
fn test_merge_result_can_be_committed() {
    Scenario::new("merge_then_commit")
        .writes_and_adds("base.txt", b"base")
        .commits("base")
        .branches("feature")
        .checks_out("feature")
        .writes_and_adds("theirs.txt", b"theirs")
        .commits("feature adds theirs")
        .checks_out("master")
        .merges("feature")
        .adds("theirs.txt")
        .commits("merge feature")
        .assert_head_message("merge feature")
        .assert_head_tracks("theirs.txt")
        .run()
        .unwrap();
}
