use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use jot::areas::database::Database;
use jot::artifacts::objects::commit::Commit;
use jot::artifacts::objects::object_id::ObjectId;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// An initialized repository with one committed file `a.txt` containing "x".
#[fixture]
pub fn committed_repository_dir(repository_dir: TempDir) -> TempDir {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "x".to_string(),
    ));
    run_jot_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_jot_command(repository_dir.path(), &["commit", "-m", "first"])
        .assert()
        .success();

    repository_dir
}

pub fn run_jot_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("jot").expect("Failed to find jot binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Raw contents of the repository-state document.
pub fn read_state(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".jot").join("state")).expect("Failed to read state document")
}

/// The HEAD commit id as recorded in the state document.
pub fn head_commit_id(dir: &Path) -> String {
    read_state(dir)
        .lines()
        .find_map(|line| line.strip_prefix("head "))
        .expect("state document has no head record")
        .to_string()
}

/// The tip commit id of a branch as recorded in the state document.
pub fn branch_tip(dir: &Path, branch: &str) -> String {
    let prefix = format!("branch {} ", branch);
    read_state(dir)
        .lines()
        .find_map(|line| line.strip_prefix(&prefix))
        .unwrap_or_else(|| panic!("state document has no branch record for {}", branch))
        .to_string()
}

/// Number of commit objects in the store.
pub fn commit_count(dir: &Path) -> usize {
    std::fs::read_dir(dir.join(".jot").join("commits"))
        .expect("Failed to list commits directory")
        .count()
}

/// Load a commit object straight from the store.
pub fn load_commit(dir: &Path, id: &str) -> Commit {
    let database = Database::new(dir.join(".jot").into_boxed_path());
    let oid = ObjectId::try_parse(id.to_string()).expect("invalid commit id");
    database.load_commit(&oid).expect("Failed to load commit")
}
