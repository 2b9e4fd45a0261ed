//! Split-point search for merges
//!
//! The split point is the base of a three-way merge: a commit reachable from
//! both branch tips. The search is a breadth-first traversal seeded with both
//! tips at once; the first id dequeued that has already been visited is
//! reachable from both seeds and is returned as the split point.
//!
//! In graphs with several merge commits this first collision is not
//! necessarily the lowest common ancestor; that is accepted, documented
//! behavior. Every merge commit contributes both of its parents to the
//! traversal, so histories that were merged before are still connected.
//!
//! The finder is generic over a commit-loader function, so it works against
//! the on-disk store and against in-memory graphs in tests alike.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};

pub struct SplitFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> SplitFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    /// Creates a new split finder over the given commit loader.
    ///
    /// The loader takes a commit id and returns a [`SlimCommit`] carrying the
    /// commit's parent ids (empty for the root commit).
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Find the split point of two commits.
    ///
    /// Returns `None` only when the commits share no history at all, which
    /// cannot happen in a repository grown from a single root commit.
    pub fn find_split_point(
        &self,
        source_commit_id: &ObjectId,
        target_commit_id: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let mut queue = VecDeque::from([source_commit_id.clone(), target_commit_id.clone()]);
        let mut visited = HashSet::<ObjectId>::new();

        while let Some(commit_id) = queue.pop_front() {
            // the first id reached from both seeds is the split point
            if !visited.insert(commit_id.clone()) {
                return Ok(Some(commit_id));
            }

            let commit = (self.commit_loader)(&commit_id)?;
            for parent_id in commit.parents {
                queue.push_back(parent_id);
            }
        }

        Ok(None)
    }
}
