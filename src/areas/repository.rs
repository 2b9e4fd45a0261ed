use crate::areas::database::Database;
use crate::areas::state::RepositoryState;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Name of the control directory holding the object store and state document.
pub const CONTROL_DIR: &str = ".jot";

/// The repository context: the working tree, the object store, and the path
/// to the persisted state, wired together and handed to every operation.
///
/// The state document itself is loaded per operation, mutated in memory, and
/// written back before returning; it is never cached across operations.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    workspace: Workspace,
    database: Database,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;

        let workspace = Workspace::new(path.clone().into_boxed_path());
        let database = Database::new(path.join(CONTROL_DIR).into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            workspace,
            database,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn control_path(&self) -> Box<Path> {
        self.path.join(CONTROL_DIR).into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Load the persisted state; fails if the repository is not initialized.
    pub fn load_state(&self) -> anyhow::Result<RepositoryState> {
        RepositoryState::load(self.control_path())
    }

    pub fn head_commit(&self, state: &RepositoryState) -> anyhow::Result<Commit> {
        self.database.load_commit(state.head())
    }
}
