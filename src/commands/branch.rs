use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;

impl Repository {
    /// Create a branch pointing at the current HEAD.
    pub fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;
        let name = BranchName::try_parse(name.to_string())?;

        if state.has_branch(name.as_ref()) {
            anyhow::bail!("A branch with that name already exists.");
        }

        let head = state.head().clone();
        state.insert_branch(name.into_string(), head);
        state.save()
    }

    /// Delete a branch pointer; the commits it pointed at are untouched.
    pub fn rm_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;

        if !state.has_branch(name) {
            anyhow::bail!("A branch with that name does not exist.");
        }
        if state.current_branch() == name {
            anyhow::bail!("Cannot remove the current branch.");
        }

        state.remove_branch(name);
        state.save()
    }
}
