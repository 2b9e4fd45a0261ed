use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::untracked_files;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Print branches, the staged change sets, and untracked files.
    pub fn status(&self) -> anyhow::Result<()> {
        let state = self.load_state()?;
        let head_commit = self.head_commit(&state)?;
        let untracked = untracked_files(self.workspace(), &head_commit, state.stage())?;

        writeln!(self.writer(), "=== Branches ===")?;
        for name in state.branches().keys() {
            if name == state.current_branch() {
                writeln!(self.writer(), "{}", format!("*{}", name).green())?;
            } else {
                writeln!(self.writer(), "{}", name)?;
            }
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Staged Files ===")?;
        for name in state.stage().additions().keys() {
            writeln!(self.writer(), "{}", name)?;
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Removed Files ===")?;
        for name in state.stage().removals() {
            writeln!(self.writer(), "{}", name)?;
        }
        writeln!(self.writer())?;

        // workspace-vs-stage content diffing is out of scope, the section
        // header is still printed
        writeln!(self.writer(), "=== Modifications Not Staged For Commit ===")?;
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Untracked Files ===")?;
        for name in &untracked {
            writeln!(self.writer(), "{}", name)?;
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
