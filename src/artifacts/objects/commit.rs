//! Commit object
//!
//! A commit is an immutable snapshot of the tracked file set: a mapping from
//! filenames to blob ids, plus a message, a human-readable timestamp, and up
//! to two parent ids (the second parent only exists on merge commits). The
//! id covers the full parent pair, so two merge commits that differ only in
//! their merged-in parent never collide.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-id>
//! timestamp <timestamp>
//! file <blob-id> <name>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use std::collections::BTreeMap;
use std::io::{Read, Write};

/// Timestamp format, e.g. "Thu Aug 06 14:03:21 2026 +0000"
const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

/// Immutable snapshot of the tracked filename-to-blob mapping plus metadata
/// and parent links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Parent commit ids: empty for the root commit, one for an ordinary
    /// commit, two for a merge commit (primary parent first)
    parents: Vec<ObjectId>,
    /// Commit message
    message: String,
    /// Human-readable creation timestamp
    timestamp: String,
    /// Tracked files, keyed by filename (iteration is filename-sorted)
    files: BTreeMap<String, ObjectId>,
}

impl Commit {
    pub fn new(
        message: String,
        timestamp: String,
        parents: Vec<ObjectId>,
        files: BTreeMap<String, ObjectId>,
    ) -> Self {
        Commit {
            parents,
            message,
            timestamp,
            files,
        }
    }

    /// Current local time in the commit timestamp format.
    pub fn timestamp_now() -> String {
        chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the commit message, for short-form display.
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Primary parent, absent only on the root commit.
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    /// Secondary parent, present only on merge commits.
    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.parents.get(1)
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn files(&self) -> &BTreeMap<String, ObjectId> {
        &self.files
    }

    pub fn blob_id(&self, name: &str) -> Option<&ObjectId> {
        self.files.get(name)
    }

    pub fn tracks(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<bytes::Bytes> {
        let mut object_content = vec![];

        for parent in &self.parents {
            object_content.push(format!("parent {}", parent.as_ref()));
        }
        object_content.push(format!("timestamp {}", self.timestamp));
        for (name, blob_id) in &self.files {
            object_content.push(format!("file {} {}", blob_id.as_ref(), name));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        let object_content = object_content.join("\n");

        let mut commit_bytes = Vec::new();
        let header = format!(
            "{} {}\0",
            self.object_type().as_str(),
            object_content.len()
        );
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(object_content.as_bytes())?;

        Ok(bytes::Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl std::io::BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let mut lines = content.lines();

        let mut parents = Vec::new();
        let mut next_line = lines
            .next()
            .context("invalid commit object: missing timestamp line")?;

        while let Some(parent_id) = next_line.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent_id.to_string())?);
            next_line = lines
                .next()
                .context("invalid commit object: missing timestamp line")?;
        }

        let timestamp = next_line
            .strip_prefix("timestamp ")
            .context("invalid commit object: invalid timestamp line")?
            .to_string();

        let mut files = BTreeMap::new();
        for next_line in lines.by_ref() {
            if next_line.is_empty() {
                break;
            }

            let entry = next_line
                .strip_prefix("file ")
                .context("invalid commit object: invalid file line")?;
            let (blob_id, name) = entry
                .split_once(' ')
                .context("invalid commit object: malformed file entry")?;
            files.insert(name.to_string(), ObjectId::try_parse(blob_id.to_string())?);
        }

        let message = lines.collect::<Vec<&str>>().join("\n");
        Ok(Self::new(message, timestamp, parents, files))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}

/// Slim representation of a commit
///
/// Carries only what the split-point search needs: the commit's id and its
/// parent ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parents: Vec<ObjectId>,
}
