//! Blob object
//!
//! A blob is an immutable snapshot of one file: its name and content bytes.
//! The name is part of the hashed payload, so two files with identical
//! content but different names get distinct ids, and the name is available
//! again when a conflicted version of the file has to be reconstructed.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<name>\n<content>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Read, Write};

/// Immutable content-addressed record of one file's name and bytes.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    name: String,
    content: Vec<u8>,
}

impl Blob {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Content rendered as UTF-8 text, for conflict-marker construction.
    pub fn content_as_text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut payload = Vec::new();
        payload.write_all(self.name.as_bytes())?;
        payload.write_all(b"\n")?;
        payload.write_all(&self.content)?;

        let mut blob_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), payload.len());
        blob_bytes.write_all(header.as_bytes())?;
        blob_bytes.write_all(&payload)?;

        Ok(Bytes::from(blob_bytes))
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let mut name = String::new();
        reader
            .read_line(&mut name)
            .context("invalid blob object: missing name line")?;
        let name = name
            .strip_suffix('\n')
            .context("invalid blob object: unterminated name line")?
            .to_string();

        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Ok(Self::new(name, content))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn id_is_deterministic_over_name_and_content() {
        let a = Blob::new("a.txt".to_string(), b"hello".to_vec());
        let b = Blob::new("a.txt".to_string(), b"hello".to_vec());

        assert_eq!(a.object_id().unwrap(), b.object_id().unwrap());
    }

    #[test]
    fn id_changes_with_name() {
        let a = Blob::new("a.txt".to_string(), b"hello".to_vec());
        let b = Blob::new("b.txt".to_string(), b"hello".to_vec());

        assert_ne!(a.object_id().unwrap(), b.object_id().unwrap());
    }

    #[test]
    fn id_changes_with_content() {
        let a = Blob::new("a.txt".to_string(), b"hello".to_vec());
        let b = Blob::new("a.txt".to_string(), b"world".to_vec());

        assert_ne!(a.object_id().unwrap(), b.object_id().unwrap());
    }

    #[test]
    fn serialization_round_trips() {
        let blob = Blob::new("notes.txt".to_string(), b"line one\nline two\n".to_vec());
        let bytes = blob.serialize().unwrap();

        let mut reader = Cursor::new(bytes);
        ObjectType::parse_header(&mut reader).unwrap();
        let decoded = Blob::deserialize(reader).unwrap();

        assert_eq!(decoded, blob);
    }

    #[test]
    fn empty_content_round_trips() {
        let blob = Blob::new("empty".to_string(), Vec::new());
        let bytes = blob.serialize().unwrap();

        let mut reader = Cursor::new(bytes);
        ObjectType::parse_header(&mut reader).unwrap();
        let decoded = Blob::deserialize(reader).unwrap();

        assert_eq!(decoded.content(), b"");
    }
}
