//! A minimal version-control engine: content-addressed blobs and commits,
//! a staging area, branch/HEAD management, working-tree checkout, and a
//! three-way merge with conflict marking.

pub mod areas;
pub mod artifacts;
pub mod commands;
