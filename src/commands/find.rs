use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print the id of every commit whose message equals `message` exactly.
    ///
    /// This is a linear scan over all persisted commits; there is no index
    /// by message.
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        self.load_state()?;

        let mut found = false;
        for commit_id in self.database().list_commit_ids()? {
            let commit = self.database().load_commit(&commit_id)?;
            if commit.message() == message {
                writeln!(self.writer(), "{}", commit_id)?;
                found = true;
            }
        }

        if !found {
            anyhow::bail!("Found no commit with that message.");
        }

        Ok(())
    }
}
