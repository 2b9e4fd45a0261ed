use std::io::BufRead;

/// Kind of a stored object, as recorded in the frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Blob,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
        }
    }

    /// Name of the store subdirectory holding objects of this kind.
    pub fn dir_name(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blobs",
            ObjectType::Commit => "commits",
        }
    }

    /// Parse the `<kind> <size>\0` frame header, leaving the reader
    /// positioned at the start of the payload.
    pub fn parse_header(reader: &mut impl BufRead) -> anyhow::Result<ObjectType> {
        let mut header = Vec::new();
        reader.read_until(b'\0', &mut header)?;

        if header.pop() != Some(b'\0') {
            anyhow::bail!("truncated object header");
        }

        let header = String::from_utf8(header)?;
        let (kind, size) = header
            .split_once(' ')
            .ok_or_else(|| anyhow::anyhow!("malformed object header: {}", header))?;
        size.parse::<usize>()
            .map_err(|_| anyhow::anyhow!("malformed object size: {}", size))?;

        match kind {
            "blob" => Ok(ObjectType::Blob),
            "commit" => Ok(ObjectType::Commit),
            _ => anyhow::bail!("unknown object type: {}", kind),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
