//! Whole-tree checkout migration
//!
//! Reconciling the working tree with a target commit happens in two phases:
//!
//! 1. Plan: compute every file write (target's mapping) and every deletion
//!    (files tracked by the outgoing commit but absent from the target).
//! 2. Apply: write blob contents, then delete outgoing-only files.
//!
//! The untracked-file gate runs before any mutation: a working-tree file the
//! current commit does not track and the stage does not cover would be
//! silently clobbered or orphaned by the sync, so the whole operation aborts
//! instead.

use crate::areas::database::Database;
use crate::areas::state::Stage;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeSet;

/// Files in the working tree that are neither tracked by the given commit
/// nor staged for addition, name-sorted.
pub fn untracked_files(
    workspace: &Workspace,
    commit: &Commit,
    stage: &Stage,
) -> anyhow::Result<BTreeSet<String>> {
    Ok(workspace
        .list_plain_files()?
        .into_iter()
        .filter(|name| !commit.tracks(name) && !stage.is_staged_for_addition(name))
        .collect())
}

/// Abort with the untracked-file conflict unless the working tree is clean
/// of untracked files. Must run before any destructive mutation.
pub fn ensure_no_untracked(
    workspace: &Workspace,
    commit: &Commit,
    stage: &Stage,
) -> anyhow::Result<()> {
    if !untracked_files(workspace, commit, stage)?.is_empty() {
        anyhow::bail!(
            "There is an untracked file in the way; delete it, or add and commit it first."
        );
    }

    Ok(())
}

/// Planned and appliable working-tree sync from one commit's file mapping to
/// another's.
pub struct Migration<'r> {
    workspace: &'r Workspace,
    database: &'r Database,
    /// Files to write, with the blob to take the content from
    writes: Vec<(String, ObjectId)>,
    /// Files tracked by the outgoing commit but absent from the target
    deletes: Vec<String>,
}

impl<'r> Migration<'r> {
    pub fn plan(
        workspace: &'r Workspace,
        database: &'r Database,
        outgoing: &Commit,
        target: &Commit,
    ) -> Self {
        let writes = target
            .files()
            .iter()
            .map(|(name, blob_id)| (name.clone(), blob_id.clone()))
            .collect();

        let deletes = outgoing
            .files()
            .keys()
            .filter(|name| !target.tracks(name))
            .cloned()
            .collect();

        Migration {
            workspace,
            database,
            writes,
            deletes,
        }
    }

    pub fn writes(&self) -> &[(String, ObjectId)] {
        &self.writes
    }

    pub fn deletes(&self) -> &[String] {
        &self.deletes
    }

    pub fn apply(&self) -> anyhow::Result<()> {
        for (name, blob_id) in &self.writes {
            let blob = self.database.load_blob(blob_id)?;
            self.workspace.write_file(name, blob.content())?;
        }

        for name in &self.deletes {
            self.workspace.delete_file(name)?;
        }

        Ok(())
    }
}
