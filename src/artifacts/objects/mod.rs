//! Object types and content addressing
//!
//! Everything under version control is stored as an object identified by its
//! SHA-1 hash. There are two kinds:
//!
//! - **Blob**: one file's name and content bytes
//! - **Commit**: a snapshot of the tracked filename-to-blob mapping plus
//!   metadata (message, timestamp, parent commits)
//!
//! Both serialize to the framed format `<kind> <size>\0<payload>`; the object
//! id is the SHA-1 of the framed bytes.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
