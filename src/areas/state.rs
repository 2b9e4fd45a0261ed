//! Repository-state document
//!
//! The mutable half of the repository: branch pointers, the current branch,
//! HEAD, and the staging area. Everything else (blobs, commits) lives in the
//! append-only object store; this single document is the only file that is
//! rewritten in place.
//!
//! ## File format
//!
//! UTF-8 text, one record per line:
//!
//! ```text
//! branch <name> <commit-id>
//! current <name>
//! head <commit-id>
//! add <blob-id> <name>
//! rm <name>
//! ```
//!
//! ## Crash safety
//!
//! Saving takes an exclusive lock on `state.lock`, writes the full document
//! to a temp file, and renames it over `state`, so the document never
//! reflects a half-written update.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use fake::rand;
use file_guard::Lock;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::Path;

const STATE_FILE: &str = "state";
const LOCK_FILE: &str = "state.lock";

/// The pending-change set layered on the current commit: filename-to-blob
/// additions and filename removals, consumed by the next commit.
///
/// Invariant: a filename never appears in both sets at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stage {
    additions: BTreeMap<String, ObjectId>,
    removals: BTreeSet<String>,
}

impl Stage {
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn additions(&self) -> &BTreeMap<String, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<String> {
        &self.removals
    }

    pub fn staged_addition(&self, name: &str) -> Option<&ObjectId> {
        self.additions.get(name)
    }

    pub fn is_staged_for_addition(&self, name: &str) -> bool {
        self.additions.contains_key(name)
    }

    pub fn is_staged_for_removal(&self, name: &str) -> bool {
        self.removals.contains(name)
    }

    pub fn stage_addition(&mut self, name: String, blob_id: ObjectId) {
        self.removals.remove(&name);
        self.additions.insert(name, blob_id);
    }

    pub fn unstage_addition(&mut self, name: &str) -> Option<ObjectId> {
        self.additions.remove(name)
    }

    pub fn stage_removal(&mut self, name: String) {
        self.additions.remove(&name);
        self.removals.insert(name);
    }

    pub fn unstage_removal(&mut self, name: &str) -> bool {
        self.removals.remove(name)
    }

    pub fn clear(&mut self) {
        self.additions.clear();
        self.removals.clear();
    }
}

/// The persisted repository state: branch pointers, the active branch, the
/// HEAD commit id, and the staging area.
///
/// HEAD always equals the current branch's tip; detached HEAD is not
/// supported.
#[derive(Debug)]
pub struct RepositoryState {
    root: Box<Path>,
    branches: BTreeMap<String, ObjectId>,
    current_branch: String,
    head: ObjectId,
    stage: Stage,
}

impl RepositoryState {
    /// Fresh state for a newly initialized repository: a single `master`
    /// branch pointing at the root commit.
    pub fn bootstrap(root: Box<Path>, root_commit: ObjectId) -> Self {
        RepositoryState {
            root,
            branches: BTreeMap::from([("master".to_string(), root_commit.clone())]),
            current_branch: "master".to_string(),
            head: root_commit,
            stage: Stage::default(),
        }
    }

    pub fn load(root: Box<Path>) -> anyhow::Result<Self> {
        let state_path = root.join(STATE_FILE);
        if !state_path.exists() {
            anyhow::bail!("Not in an initialized jot directory.");
        }

        let content = std::fs::read_to_string(&state_path)
            .with_context(|| format!("unable to read state document {}", state_path.display()))?;

        let mut branches = BTreeMap::new();
        let mut current_branch = None;
        let mut head = None;
        let mut stage = Stage::default();

        for line in content.lines().filter(|line| !line.is_empty()) {
            let (record, rest) = line
                .split_once(' ')
                .with_context(|| format!("malformed state record: {}", line))?;

            match record {
                "branch" => {
                    let (name, oid) = rest
                        .rsplit_once(' ')
                        .with_context(|| format!("malformed branch record: {}", line))?;
                    branches.insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
                }
                "current" => current_branch = Some(rest.to_string()),
                "head" => head = Some(ObjectId::try_parse(rest.to_string())?),
                "add" => {
                    let (oid, name) = rest
                        .split_once(' ')
                        .with_context(|| format!("malformed add record: {}", line))?;
                    stage
                        .additions
                        .insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
                }
                "rm" => {
                    stage.removals.insert(rest.to_string());
                }
                _ => anyhow::bail!("unknown state record: {}", line),
            }
        }

        Ok(RepositoryState {
            root,
            branches,
            current_branch: current_branch.context("state document missing current branch")?,
            head: head.context("state document missing head")?,
            stage,
        })
    }

    /// Write the state document atomically under an exclusive lock.
    pub fn save(&self) -> anyhow::Result<()> {
        let mut lock_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.root.join(LOCK_FILE))
            .context("unable to open state lock file")?;
        let _lock = file_guard::lock(&mut lock_file, Lock::Exclusive, 0, 1)
            .context("unable to lock state document")?;

        let mut document = String::new();
        for (name, oid) in &self.branches {
            document.push_str(&format!("branch {} {}\n", name, oid));
        }
        document.push_str(&format!("current {}\n", self.current_branch));
        document.push_str(&format!("head {}\n", self.head));
        for (name, oid) in &self.stage.additions {
            document.push_str(&format!("add {} {}\n", oid, name));
        }
        for name in &self.stage.removals {
            document.push_str(&format!("rm {}\n", name));
        }

        let temp_path = self
            .root
            .join(format!("{}-{}", STATE_FILE, rand::random::<u32>()));
        let mut temp_file = std::fs::File::create(&temp_path).with_context(|| {
            format!("unable to create temp state file {}", temp_path.display())
        })?;
        temp_file.write_all(document.as_bytes())?;

        // rename over the old document so readers never see a torn write
        std::fs::rename(&temp_path, self.root.join(STATE_FILE))
            .context("unable to replace state document")?;

        Ok(())
    }

    pub fn head(&self) -> &ObjectId {
        &self.head
    }

    pub fn current_branch(&self) -> &str {
        &self.current_branch
    }

    pub fn branches(&self) -> &BTreeMap<String, ObjectId> {
        &self.branches
    }

    pub fn branch_tip(&self, name: &str) -> Option<&ObjectId> {
        self.branches.get(name)
    }

    pub fn has_branch(&self, name: &str) -> bool {
        self.branches.contains_key(name)
    }

    pub fn insert_branch(&mut self, name: String, oid: ObjectId) {
        self.branches.insert(name, oid);
    }

    pub fn remove_branch(&mut self, name: &str) {
        self.branches.remove(name);
    }

    /// Move the current branch's tip and HEAD together.
    pub fn advance_head(&mut self, oid: ObjectId) {
        self.branches
            .insert(self.current_branch.clone(), oid.clone());
        self.head = oid;
    }

    /// Make another branch the active one, pointing HEAD at its tip.
    pub fn switch_branch(&mut self, name: String, tip: ObjectId) {
        self.current_branch = name;
        self.head = tip;
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    fn test_oid(seed: u8) -> ObjectId {
        ObjectId::try_parse(format!("{:02x}", seed).repeat(20)).unwrap()
    }

    #[test]
    fn staging_keeps_additions_and_removals_disjoint() {
        let mut stage = Stage::default();

        stage.stage_addition("a.txt".to_string(), test_oid(1));
        stage.stage_removal("a.txt".to_string());
        assert!(!stage.is_staged_for_addition("a.txt"));
        assert!(stage.is_staged_for_removal("a.txt"));

        stage.stage_addition("a.txt".to_string(), test_oid(2));
        assert!(stage.is_staged_for_addition("a.txt"));
        assert!(!stage.is_staged_for_removal("a.txt"));
    }

    #[test]
    fn state_document_round_trips() {
        let dir = TempDir::new().unwrap();
        let root: Box<Path> = dir.path().into();

        let mut state = RepositoryState::bootstrap(root.clone(), test_oid(1));
        state.insert_branch("feature".to_string(), test_oid(2));
        state
            .stage_mut()
            .stage_addition("a file.txt".to_string(), test_oid(3));
        state.stage_mut().stage_removal("old.txt".to_string());
        state.save().unwrap();

        let loaded = RepositoryState::load(root).unwrap();

        assert_eq!(loaded.branches(), state.branches());
        assert_eq!(loaded.current_branch(), "master");
        assert_eq!(loaded.head(), &test_oid(1));
        assert_eq!(loaded.stage(), state.stage());
    }

    #[test]
    fn loading_from_an_uninitialized_directory_fails() {
        let dir = TempDir::new().unwrap();
        let result = RepositoryState::load(dir.path().into());

        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Not in an initialized jot directory.")
        );
    }

    #[test]
    fn advance_head_moves_branch_and_head_together() {
        let dir = TempDir::new().unwrap();
        let mut state = RepositoryState::bootstrap(dir.path().into(), test_oid(1));

        state.advance_head(test_oid(2));

        assert_eq!(state.head(), &test_oid(2));
        assert_eq!(state.branch_tip("master"), Some(&test_oid(2)));
    }
}
