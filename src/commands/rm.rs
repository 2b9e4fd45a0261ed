use crate::areas::repository::Repository;
use crate::areas::state::RepositoryState;

impl Repository {
    /// Stage a tracked file for removal, or un-stage a pending addition.
    pub fn rm(&mut self, name: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;
        self.remove_file(&mut state, name)?;
        state.save()
    }

    /// The removal logic behind `rm`, shared with the merge flow.
    ///
    /// Deleting the working-tree file only happens for files tracked by the
    /// current commit; an un-staged addition leaves the file alone.
    pub(crate) fn remove_file(
        &self,
        state: &mut RepositoryState,
        name: &str,
    ) -> anyhow::Result<()> {
        if state.stage_mut().unstage_addition(name).is_some() {
            return Ok(());
        }

        let head_commit = self.head_commit(state)?;
        if head_commit.tracks(name) {
            state.stage_mut().stage_removal(name.to_string());
            self.workspace().delete_file(name)?;
            return Ok(());
        }

        anyhow::bail!("No reason to remove the file.");
    }
}
