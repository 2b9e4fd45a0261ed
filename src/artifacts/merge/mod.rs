//! Merge algorithms
//!
//! - `split_finder`: locates the split point (common ancestor) of two branch
//!   tips by breadth-first traversal of the commit graph
//! - `resolution`: classifies every file across the split, current, and
//!   target commits into a merge action
//! - `conflict`: renders conflict-marker files from the two sides' blobs

pub mod conflict;
pub mod resolution;
pub mod split_finder;
