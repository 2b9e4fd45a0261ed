use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

/// Content-addressed object store
///
/// One zlib-compressed file per object, named by its full id, under a
/// per-kind subdirectory (`blobs/` or `commits/`) of the control directory.
/// Writes are idempotent: an id that already exists is never rewritten.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn kind_path(&self, kind: ObjectType) -> PathBuf {
        self.path.join(kind.dir_name())
    }

    fn object_path(&self, kind: ObjectType, object_id: &ObjectId) -> PathBuf {
        self.kind_path(kind).join(object_id.as_ref())
    }

    /// Persist an object under its content digest and return the id.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.object_path(object.object_type(), &object_id);

        // write the object to disk unless it already exists
        if !object_path.exists() {
            std::fs::create_dir_all(object_path.parent().context("invalid object path")?)
                .with_context(|| {
                    format!("unable to create object directory for {}", object_id)
                })?;

            self.write_object(object_path, object.serialize()?)?;
        }

        Ok(object_id)
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let reader = self.read_object(ObjectType::Blob, object_id)?;
        Blob::deserialize(reader)
    }

    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let reader = self.read_object(ObjectType::Commit, object_id)?;
        Commit::deserialize(reader)
    }

    /// List every commit id in the store, lexicographically sorted.
    pub fn list_commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let commits_path = self.kind_path(ObjectType::Commit);

        let mut ids = std::fs::read_dir(&commits_path)
            .with_context(|| format!("unable to list {}", commits_path.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                ObjectId::try_parse(entry.file_name().to_string_lossy().to_string()).ok()
            })
            .collect::<Vec<_>>();

        ids.sort();
        Ok(ids)
    }

    /// Resolve a commit id or unique id prefix to a full commit id.
    ///
    /// Candidates are scanned in lexicographic order; an ambiguous prefix is
    /// an error rather than an arbitrary pick.
    pub fn resolve_commit_prefix(&self, prefix: &str) -> anyhow::Result<ObjectId> {
        let mut matches = self
            .list_commit_ids()?
            .into_iter()
            .filter(|id| id.as_ref().starts_with(prefix));

        match (matches.next(), matches.next()) {
            (Some(id), None) => Ok(id),
            (None, _) => anyhow::bail!("No commit with that id exists."),
            (Some(_), Some(_)) => anyhow::bail!("ambiguous commit id prefix: {}", prefix),
        }
    }

    fn read_object(
        &self,
        kind: ObjectType,
        object_id: &ObjectId,
    ) -> anyhow::Result<impl BufRead> {
        let object_path = self.object_path(kind, object_id);

        let object_content = std::fs::read(&object_path).with_context(|| {
            format!("unable to read object file {}", object_path.display())
        })?;
        let object_content = Self::decompress(object_content.into())?;

        let mut object_reader = Cursor::new(object_content);
        let stored_kind = ObjectType::parse_header(&mut object_reader)?;
        if stored_kind != kind {
            anyhow::bail!("object {} is a {}, not a {}", object_id, stored_kind, kind);
        }

        Ok(object_reader)
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path.parent().context("invalid object path")?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .with_context(|| {
                format!("unable to open object file {}", temp_object_path.display())
            })?;
        file.write_all(&object_content).with_context(|| {
            format!("unable to write object file {}", temp_object_path.display())
        })?;

        // rename the temp file to the object file to make the write atomic
        std::fs::rename(&temp_object_path, &object_path).with_context(|| {
            format!("unable to rename object file to {}", object_path.display())
        })?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;

    fn database(dir: &TempDir) -> Database {
        let root = dir.path().join(".jot");
        std::fs::create_dir_all(root.join("blobs")).unwrap();
        std::fs::create_dir_all(root.join("commits")).unwrap();
        Database::new(root.into_boxed_path())
    }

    #[test]
    fn storing_a_blob_twice_produces_a_single_object() {
        let dir = TempDir::new().unwrap();
        let database = database(&dir);

        let blob = Blob::new("a.txt".to_string(), b"x".to_vec());
        let first = database.store(&blob).unwrap();
        let second = database.store(&blob).unwrap();

        assert_eq!(first, second);
        let entries = std::fs::read_dir(database.kind_path(ObjectType::Blob))
            .unwrap()
            .count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn stored_blob_round_trips_byte_identically() {
        let dir = TempDir::new().unwrap();
        let database = database(&dir);

        let blob = Blob::new("a.txt".to_string(), b"some\ncontent\n".to_vec());
        let id = database.store(&blob).unwrap();

        let loaded = database.load_blob(&id).unwrap();
        assert_eq!(loaded, blob);
    }

    #[test]
    fn prefix_resolution_rejects_unknown_and_ambiguous_prefixes() {
        let dir = TempDir::new().unwrap();
        let database = database(&dir);

        let one = database
            .store(&crate::artifacts::objects::commit::Commit::new(
                "one".to_string(),
                "Thu Aug 06 14:03:21 2026 +0000".to_string(),
                vec![],
                Default::default(),
            ))
            .unwrap();

        assert_eq!(
            database.resolve_commit_prefix(&one.as_ref()[..7]).unwrap(),
            one
        );
        assert!(database.resolve_commit_prefix("0123456").is_err());
        // the empty prefix matches everything, so with two commits it is ambiguous
        database
            .store(&crate::artifacts::objects::commit::Commit::new(
                "two".to_string(),
                "Thu Aug 06 14:03:21 2026 +0000".to_string(),
                vec![],
                Default::default(),
            ))
            .unwrap();
        assert!(database.resolve_commit_prefix("").is_err());
    }
}
