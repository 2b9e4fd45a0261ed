use crate::areas::repository::Repository;
use crate::areas::state::RepositoryState;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;

impl Repository {
    /// Stage a working-tree file for inclusion in the next commit.
    pub fn add(&mut self, name: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;
        self.stage_file(&mut state, name)?;
        state.save()
    }

    /// The staging logic behind `add`, shared with the merge flow.
    ///
    /// Staging the same content twice is a no-op, and re-adding the exact
    /// committed version drops any stale staged entry instead of recording
    /// a pointless one.
    pub(crate) fn stage_file(
        &self,
        state: &mut RepositoryState,
        name: &str,
    ) -> anyhow::Result<()> {
        if !self.workspace().file_exists(name) {
            anyhow::bail!("File does not exist.");
        }

        // re-adding a file staged for removal just cancels the removal
        if state.stage_mut().unstage_removal(name) {
            return Ok(());
        }

        let blob = Blob::new(name.to_string(), self.workspace().read_file(name)?);
        let candidate_id = blob.object_id()?;

        let head_commit = self.head_commit(state)?;
        if head_commit.blob_id(name) == Some(&candidate_id) {
            // reverted to the committed version: nothing left to stage
            state.stage_mut().unstage_addition(name);
            return Ok(());
        }

        if state.stage().staged_addition(name) == Some(&candidate_id) {
            return Ok(());
        }

        self.database().store(&blob)?;
        state.stage_mut().stage_addition(name.to_string(), candidate_id);

        Ok(())
    }
}
