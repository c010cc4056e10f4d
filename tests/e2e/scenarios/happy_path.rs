use crate::harness::Scenario;

#[test]
fn test_add_commit_and_track() {
    Scenario::new("add_commit_and_track")
        .writes_and_adds("notes.txt", b"first draft")
        .commits("add notes")
        .assert_commit_count(2) // Initial commit + ours
        .assert_head_message("add notes")
        .assert_head_tracks("notes.txt")
        .assert_staged_empty()
        .run()
        .expect("scenario should pass");
}

#[test]
fn test_fixture_workspace() {
    Scenario::new("fixture_workspace")
        .from_fixture("default")
        .adds("notes.txt")
        .adds("src/main.txt")
        .commits("import fixture")
        .assert_head_tracks("notes.txt")
        .assert_head_tracks("src/main.txt")
        .run()
        .unwrap();
}

#[test]
fn test_removal_drops_file_from_history() {
    Scenario::new("removal_drops_file")
        .writes_and_adds("a.txt", b"a")
        .writes_and_adds("b.txt", b"b")
        .commits("add both")
        .removes("b.txt")
        .commits("drop b")
        .assert_head_tracks("a.txt")
        .assert_head_missing("b.txt")
        .run()
        .unwrap();
}

#[test]
fn test_branch_switch_restores_files() {
    Scenario::new("branch_switch_restores")
        .writes_and_adds("a.txt", b"master version")
        .commits("on master")
        .branches("feature")
        .checks_out("feature")
        .writes_and_adds("a.txt", b"feature version")
        .commits("on feature")
        .checks_out("master")
        .assert_current_branch("master")
        .assert_file("a.txt", b"master version")
        .run()
        .unwrap();
}

#[test]
fn test_checkout_file_from_older_commit() {
    Scenario::new("checkout_file_from_older_commit")
        .writes_and_adds("a.txt", b"old")
        .commits("old version")
        .writes_and_adds("a.txt", b"new")
        .commits("new version")
        .restores_from("old version", "a.txt")
        .assert_file("a.txt", b"old")
        .restores("a.txt")
        .assert_file("a.txt", b"new")
        .run()
        .unwrap();
}

#[test]
fn test_reset_rewinds_head_and_working_tree() {
    Scenario::new("reset_rewinds")
        .writes_and_adds("a.txt", b"old")
        .commits("old version")
        .writes_and_adds("a.txt", b"new")
        .commits("new version")
        .resets_to("old version")
        .assert_head_message("old version")
        .assert_file("a.txt", b"old")
        .run()
        .unwrap();
}

#[test]
fn test_unchanged_bytes_survive_many_commits() {
    // The stored bytes for a path live with the commit that staged
    // them; later commits reach them through provenance.
    Scenario::new("provenance_chain")
        .writes_and_adds("keep.txt", b"unchanged")
        .commits("add keep")
        .writes_and_adds("other.txt", b"1")
        .commits("touch other once")
        .writes_and_adds("other.txt", b"2")
        .commits("touch other twice")
        .writes("keep.txt", b"dirty working copy")
        .restores("keep.txt")
        .assert_file("keep.txt", b"unchanged")
        .run()
        .unwrap();
}
