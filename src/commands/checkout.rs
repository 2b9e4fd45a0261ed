use crate::areas::repository::Repository;
use crate::areas::state::RepositoryState;
use crate::artifacts::checkout::migration::{Migration, ensure_no_untracked};
use crate::artifacts::objects::commit::Commit;
use std::io::Write;

impl Repository {
    /// Restore one file from the HEAD commit.
    pub fn checkout_file(&mut self, name: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;
        let head_commit = self.head_commit(&state)?;

        self.restore_file(&mut state, &head_commit, name)?;
        state.save()
    }

    /// Restore one file from the given commit (full id or unique prefix).
    pub fn checkout_commit_file(&mut self, commit_ref: &str, name: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;
        let commit_id = self.database().resolve_commit_prefix(commit_ref)?;
        let commit = self.database().load_commit(&commit_id)?;

        self.restore_file(&mut state, &commit, name)?;
        state.save()
    }

    /// Switch to another branch, syncing the whole working tree to its tip.
    ///
    /// The untracked-file gate runs before any file is touched.
    pub fn checkout_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;

        let Some(tip) = state.branch_tip(name).cloned() else {
            anyhow::bail!("No such branch exists.");
        };
        if state.current_branch() == name {
            anyhow::bail!("No need to checkout the current branch.");
        }

        let head_commit = self.head_commit(&state)?;
        let target_commit = self.database().load_commit(&tip)?;

        ensure_no_untracked(self.workspace(), &head_commit, state.stage())?;
        Migration::plan(self.workspace(), self.database(), &head_commit, &target_commit)
            .apply()?;

        state.stage_mut().clear();
        state.switch_branch(name.to_string(), tip);
        state.save()?;

        writeln!(self.writer(), "Switched to branch '{}'", name)?;

        Ok(())
    }

    /// Overwrite (or create) the working-tree file with the version recorded
    /// in `commit` and drop any staged removal of that name.
    fn restore_file(
        &self,
        state: &mut RepositoryState,
        commit: &Commit,
        name: &str,
    ) -> anyhow::Result<()> {
        let Some(blob_id) = commit.blob_id(name) else {
            anyhow::bail!("File does not exist in that commit.");
        };

        let blob = self.database().load_blob(blob_id)?;
        self.workspace().write_file(name, blob.content())?;
        state.stage_mut().unstage_removal(name);

        Ok(())
    }
}
