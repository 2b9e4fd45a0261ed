use anyhow::Context;
use std::path::Path;
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".jot", ".", ".."];

/// The working tree: the plain files in the repository root that the user
/// edits. Tracked content lives at the top level only; the control directory
/// is never touched.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List the plain files in the repository root, name-sorted.
    pub fn list_plain_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                if Self::is_ignored(&name) {
                    None
                } else {
                    Some(name)
                }
            })
            .collect::<Vec<_>>();

        files.sort();
        Ok(files)
    }

    fn is_ignored(name: &str) -> bool {
        IGNORED_PATHS.contains(&name)
    }

    pub fn file_exists(&self, name: &str) -> bool {
        self.path.join(name).is_file()
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<Vec<u8>> {
        let file_path = self.path.join(name);

        std::fs::read(&file_path)
            .with_context(|| format!("unable to read file {}", file_path.display()))
    }

    pub fn write_file(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(name);

        std::fs::write(&file_path, content)
            .with_context(|| format!("unable to write file {}", file_path.display()))
    }

    /// Delete a working-tree file; missing files are not an error.
    pub fn delete_file(&self, name: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(name);

        if file_path.exists() {
            std::fs::remove_file(&file_path)
                .with_context(|| format!("unable to delete file {}", file_path.display()))?;
        }

        Ok(())
    }
}
