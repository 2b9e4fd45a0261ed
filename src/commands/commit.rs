use crate::areas::repository::Repository;
use crate::areas::state::RepositoryState;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Fold the staging area into a new commit and advance the current
    /// branch and HEAD to it.
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;
        let (commit_id, commit) = self.write_commit(&mut state, message, None)?;
        state.save()?;

        writeln!(
            self.writer(),
            "[{}] {}",
            commit_id.to_short(),
            commit.short_message()
        )?;

        Ok(())
    }

    /// The commit logic behind `commit`, shared with the merge flow, which
    /// passes the merged-in branch tip so the new commit carries both
    /// parents from the start.
    pub(crate) fn write_commit(
        &self,
        state: &mut RepositoryState,
        message: &str,
        merge_parent: Option<ObjectId>,
    ) -> anyhow::Result<(ObjectId, Commit)> {
        if message.trim().is_empty() {
            anyhow::bail!("Please enter a commit message.");
        }
        if state.stage().is_empty() {
            anyhow::bail!("No changes added to the commit.");
        }

        let head_commit = self.head_commit(state)?;
        let mut files = head_commit.files().clone();
        for (name, blob_id) in state.stage().additions() {
            files.insert(name.clone(), blob_id.clone());
        }
        for name in state.stage().removals() {
            files.remove(name);
        }

        let mut parents = vec![state.head().clone()];
        parents.extend(merge_parent);

        let commit = Commit::new(
            message.to_string(),
            Commit::timestamp_now(),
            parents,
            files,
        );
        let commit_id = self.database().store(&commit)?;

        state.advance_head(commit_id.clone());
        state.stage_mut().clear();

        Ok((commit_id, commit))
    }
}
