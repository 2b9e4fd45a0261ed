//! Conflict-marker rendering
//!
//! A conflicted file combines both versions' content between the usual
//! markers. Each side is rendered as UTF-8 text with a trailing newline; a
//! side with no file contributes nothing between its markers. When neither
//! side has content the file still gets written, as an empty conflict block.

use crate::artifacts::objects::blob::Blob;

const OURS_MARKER: &str = "<<<<<<< HEAD\n";
const SEPARATOR: &str = "=======\n";
const THEIRS_MARKER: &str = ">>>>>>>";

/// Render the working-tree content of a conflicted file from the two sides'
/// blobs (either may be absent).
pub fn render_conflict(ours: Option<&Blob>, theirs: Option<&Blob>) -> Vec<u8> {
    let mut result = String::new();

    result.push_str(OURS_MARKER);
    result.push_str(&side_content(ours));
    result.push_str(SEPARATOR);
    result.push_str(&side_content(theirs));
    result.push_str(THEIRS_MARKER);

    result.into_bytes()
}

fn side_content(side: Option<&Blob>) -> String {
    match side {
        Some(blob) => format!("{}\n", blob.content_as_text()),
        None => String::new(),
    }
}
