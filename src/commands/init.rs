use crate::areas::repository::Repository;
use crate::areas::state::RepositoryState;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_type::ObjectType;
use std::collections::BTreeMap;
use std::io::Write;

impl Repository {
    /// Create the control directory, the object store, the root commit, and
    /// the state document with `master` pointing at the root.
    pub fn init(&mut self) -> anyhow::Result<()> {
        let control_path = self.control_path();
        if control_path.exists() {
            anyhow::bail!(
                "A jot version-control system already exists in the current directory."
            );
        }

        std::fs::create_dir_all(self.database().kind_path(ObjectType::Blob))?;
        std::fs::create_dir_all(self.database().kind_path(ObjectType::Commit))?;

        let root_commit = Commit::new(
            "initial commit".to_string(),
            Commit::timestamp_now(),
            vec![],
            BTreeMap::new(),
        );
        let root_id = self.database().store(&root_commit)?;

        RepositoryState::bootstrap(control_path, root_id).save()?;

        writeln!(
            self.writer(),
            "Initialized empty jot repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
