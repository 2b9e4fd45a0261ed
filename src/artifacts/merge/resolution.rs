//! Per-file three-way merge classification
//!
//! Every filename appearing in the split commit, the current branch tip, or
//! the target branch tip is classified into one action. A side counts as
//! modified when its blob id differs from the split version, or when the file
//! existed at the split and that side deleted it. The rules apply in order,
//! first match wins:
//!
//! 1. modified on both sides -> conflict
//! 2. in split and on the current side, gone from the target -> remove
//! 3. newly added on the target, or changed only on the target -> take the
//!    target's version
//! 4. otherwise -> keep the current side's version
//!
//! A file added independently on both sides after the split, or changed to
//! the same content on both sides, never counts as modified relative to the
//! split and therefore falls through to "keep" instead of conflicting. This
//! mirrors the historical case table and is kept as documented behavior.

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};

/// What the merge does with one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Both sides changed the file since the split: write a conflict-marker
    /// file combining both versions and stage it
    Conflict,
    /// The target branch deleted a file the current branch left alone:
    /// stage it for removal
    Remove,
    /// Take the target branch's version and stage it
    TakeTarget,
    /// The current branch's version stands
    Keep,
}

/// Classify every file across the three commits of a merge.
///
/// The result is filename-sorted, so applying it is deterministic.
pub fn classify_files(
    split: &Commit,
    current: &Commit,
    target: &Commit,
) -> BTreeMap<String, MergeAction> {
    let filenames: BTreeSet<&String> = split
        .files()
        .keys()
        .chain(current.files().keys())
        .chain(target.files().keys())
        .collect();

    filenames
        .into_iter()
        .map(|name| {
            let action = classify_file(
                split.blob_id(name),
                current.blob_id(name),
                target.blob_id(name),
            );
            (name.clone(), action)
        })
        .collect()
}

fn classify_file(
    split_id: Option<&ObjectId>,
    current_id: Option<&ObjectId>,
    target_id: Option<&ObjectId>,
) -> MergeAction {
    let current_modified = side_modified(split_id, current_id);
    let target_modified = side_modified(split_id, target_id);

    if current_modified && target_modified {
        MergeAction::Conflict
    } else if split_id.is_some() && current_id.is_some() && target_id.is_none() {
        MergeAction::Remove
    } else if (split_id.is_none() && current_id.is_none() && target_id.is_some())
        || (split_id.is_some() && !current_modified && target_modified)
    {
        MergeAction::TakeTarget
    } else {
        MergeAction::Keep
    }
}

/// True when one side diverged from the split version: a different blob id,
/// or a deletion of a file that existed at the split. A file absent at the
/// split is never "modified", whatever the side did with it.
fn side_modified(split_id: Option<&ObjectId>, side_id: Option<&ObjectId>) -> bool {
    match (split_id, side_id) {
        (Some(split_id), Some(side_id)) => split_id != side_id,
        (Some(_), None) => true,
        (None, _) => false,
    }
}
