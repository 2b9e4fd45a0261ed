use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::ensure_no_untracked;
use crate::artifacts::merge::conflict::render_conflict;
use crate::artifacts::merge::resolution::{MergeAction, classify_files};
use crate::artifacts::merge::split_finder::SplitFinder;
use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Merge the given branch into the current one.
    ///
    /// Finds the split point of the two tips, classifies every file across
    /// the three commits, realizes the result through the staging and
    /// checkout machinery, and seals it with a two-parent merge commit.
    /// Divergence-free cases degenerate to a fast-forward or a no-op.
    pub fn merge(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;
        let head_commit = self.head_commit(&state)?;

        ensure_no_untracked(self.workspace(), &head_commit, state.stage())?;
        if !state.stage().is_empty() {
            anyhow::bail!("You have uncommitted changes.");
        }
        let Some(that_id) = state.branch_tip(branch_name).cloned() else {
            anyhow::bail!("A branch with that name does not exist.");
        };
        if state.current_branch() == branch_name {
            anyhow::bail!("Cannot merge a branch with itself.");
        }

        let this_id = state.head().clone();
        let split_id = {
            let database = self.database();
            let finder = SplitFinder::new(|oid: &ObjectId| {
                let commit = database.load_commit(oid)?;
                Ok(SlimCommit {
                    oid: oid.clone(),
                    parents: commit.parents().to_vec(),
                })
            });

            finder
                .find_split_point(&this_id, &that_id)?
                .context("no common ancestor between the two branches")?
        };

        if split_id == this_id {
            // nothing happened on the current branch since the split: the
            // merge is just a branch switch
            self.checkout_branch(branch_name)?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }
        if split_id == that_id {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }

        let split_commit = self.database().load_commit(&split_id)?;
        let that_commit = self.database().load_commit(&that_id)?;

        let actions = classify_files(&split_commit, &head_commit, &that_commit);
        let mut saw_conflict = false;
        for (name, action) in &actions {
            match action {
                MergeAction::Conflict => {
                    let ours = head_commit
                        .blob_id(name)
                        .map(|blob_id| self.database().load_blob(blob_id))
                        .transpose()?;
                    let theirs = that_commit
                        .blob_id(name)
                        .map(|blob_id| self.database().load_blob(blob_id))
                        .transpose()?;

                    let content = render_conflict(ours.as_ref(), theirs.as_ref());
                    self.workspace().write_file(name, &content)?;
                    self.stage_file(&mut state, name)?;
                    saw_conflict = true;
                }
                MergeAction::Remove => self.remove_file(&mut state, name)?,
                MergeAction::TakeTarget => {
                    let blob_id = that_commit
                        .blob_id(name)
                        .context("target version missing for merged file")?;
                    let blob = self.database().load_blob(blob_id)?;

                    self.workspace().write_file(name, blob.content())?;
                    self.stage_file(&mut state, name)?;
                }
                MergeAction::Keep => {}
            }
        }

        if saw_conflict {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        let message = format!("Merged {} into {}.", branch_name, state.current_branch());
        let (commit_id, commit) = self.write_commit(&mut state, &message, Some(that_id))?;
        state.save()?;

        writeln!(
            self.writer(),
            "[{}] {}",
            commit_id.to_short(),
            commit.short_message()
        )?;

        Ok(())
    }
}
