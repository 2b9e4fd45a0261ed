//! Commit history traversal

use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

/// Lazy walk of a commit's history following the primary parent link only,
/// from the starting commit down to the root.
///
/// The walk is stateless with respect to the repository: re-creating it from
/// the same id yields the same sequence.
pub struct History<'d> {
    database: &'d Database,
    next_oid: Option<ObjectId>,
}

impl<'d> History<'d> {
    pub fn from(database: &'d Database, start: ObjectId) -> Self {
        History {
            database,
            next_oid: Some(start),
        }
    }
}

impl Iterator for History<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.next_oid.take()?;

        match self.database.load_commit(&oid) {
            Ok(commit) => {
                self.next_oid = commit.parent().cloned();
                Some(Ok((oid, commit)))
            }
            Err(err) => Some(Err(err)),
        }
    }
}
