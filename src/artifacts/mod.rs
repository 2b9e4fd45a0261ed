//! Data structures and algorithms
//!
//! This module contains the core types and algorithms:
//!
//! - `branch`: Branch name validation
//! - `checkout`: Working-tree migration planning and the untracked-file gate
//! - `log`: Commit history traversal
//! - `merge`: Split-point search, three-way classification, conflict rendering
//! - `objects`: Object types (blob, commit) and content addressing

pub mod branch;
pub mod checkout;
pub mod log;
pub mod merge;
pub mod objects;
