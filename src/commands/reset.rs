use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::{Migration, ensure_no_untracked};

impl Repository {
    /// Sync the working tree to the given commit (full id or unique prefix)
    /// and move the current branch and HEAD there.
    pub fn reset(&mut self, commit_ref: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;
        let commit_id = self.database().resolve_commit_prefix(commit_ref)?;
        let target_commit = self.database().load_commit(&commit_id)?;
        let head_commit = self.head_commit(&state)?;

        ensure_no_untracked(self.workspace(), &head_commit, state.stage())?;
        Migration::plan(self.workspace(), self.database(), &head_commit, &target_commit)
            .apply()?;

        state.advance_head(commit_id);
        state.stage_mut().clear();
        state.save()
    }
}
