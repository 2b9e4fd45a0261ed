mod common;

use assert_fs::TempDir;
use common::command::{committed_repository_dir, read_state, repository_dir, run_jot_command};
use common::file::{FileSpec, write_file};
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn adding_a_non_existent_file_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    run_jot_command(dir.path(), &["init"]).assert().success();

    run_jot_command(dir.path(), &["add", "ghost.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File does not exist."));

    Ok(())
}

#[rstest]
fn adding_the_same_content_twice_is_idempotent(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    run_jot_command(dir.path(), &["init"]).assert().success();

    write_file(FileSpec::new(dir.path().join("a.txt"), "x".to_string()));
    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    let state_after_first = read_state(dir.path());

    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    let state_after_second = read_state(dir.path());

    assert_eq!(state_after_second, state_after_first);
    assert!(state_after_first.contains("add "));

    Ok(())
}

#[rstest]
fn re_adding_the_committed_version_drops_the_stale_staged_entry(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir;

    // stage an edit, then revert the file to its committed content
    write_file(FileSpec::new(dir.path().join("a.txt"), "y".to_string()));
    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    assert!(read_state(dir.path()).contains("add "));

    write_file(FileSpec::new(dir.path().join("a.txt"), "x".to_string()));
    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    assert!(!read_state(dir.path()).contains("add "));

    Ok(())
}

#[rstest]
fn removing_an_untracked_file_reports_nothing_to_remove(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir;

    write_file(FileSpec::new(dir.path().join("b.txt"), "b".to_string()));
    run_jot_command(dir.path(), &["rm", "b.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No reason to remove the file."));

    // the file was not deleted
    assert!(dir.path().join("b.txt").is_file());

    Ok(())
}

#[rstest]
fn removing_a_staged_file_unstages_it_without_deleting_it(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir;

    write_file(FileSpec::new(dir.path().join("b.txt"), "b".to_string()));
    run_jot_command(dir.path(), &["add", "b.txt"])
        .assert()
        .success();
    run_jot_command(dir.path(), &["rm", "b.txt"])
        .assert()
        .success();

    assert!(dir.path().join("b.txt").is_file());
    let state = read_state(dir.path());
    assert!(!state.contains("add "));
    assert!(!state.contains("rm "));

    Ok(())
}

#[rstest]
fn removing_a_tracked_file_stages_the_removal_and_deletes_it(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir;

    run_jot_command(dir.path(), &["rm", "a.txt"])
        .assert()
        .success();

    assert!(!dir.path().join("a.txt").exists());
    assert!(read_state(dir.path()).contains("rm a.txt"));

    // the removal is consumed by the next commit
    run_jot_command(dir.path(), &["commit", "-m", "drop a"])
        .assert()
        .success();
    let head = common::command::head_commit_id(dir.path());
    let commit = common::command::load_commit(dir.path(), &head);
    assert!(!commit.tracks("a.txt"));

    Ok(())
}

#[rstest]
fn adding_after_rm_cancels_the_staged_removal(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir;

    run_jot_command(dir.path(), &["rm", "a.txt"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("a.txt"), "x".to_string()));
    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    let state = read_state(dir.path());
    assert!(!state.contains("rm a.txt"));
    assert!(!state.contains("add "));

    Ok(())
}
