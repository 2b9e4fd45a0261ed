use crate::areas::repository::Repository;
use crate::artifacts::log::History;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Print the current branch's history, from HEAD down to the root,
    /// following the primary parent only.
    pub fn log(&self) -> anyhow::Result<()> {
        let state = self.load_state()?;

        for entry in History::from(self.database(), state.head().clone()) {
            let (commit_id, commit) = entry?;
            self.show_commit(&commit_id, &commit)?;
        }

        Ok(())
    }

    /// Print every commit in the store, in sorted id order.
    pub fn global_log(&self) -> anyhow::Result<()> {
        self.load_state()?;

        for commit_id in self.database().list_commit_ids()? {
            let commit = self.database().load_commit(&commit_id)?;
            self.show_commit(&commit_id, &commit)?;
        }

        Ok(())
    }

    fn show_commit(&self, commit_id: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "===")?;
        writeln!(self.writer(), "commit {}", commit_id.as_ref().yellow())?;
        if let (Some(first), Some(second)) = (commit.parent(), commit.merge_parent()) {
            writeln!(
                self.writer(),
                "Merge: {} {}",
                first.to_short(),
                second.to_short()
            )?;
        }
        writeln!(self.writer(), "Date: {}", commit.timestamp())?;
        writeln!(self.writer(), "{}", commit.message())?;
        writeln!(self.writer())?;

        Ok(())
    }
}
