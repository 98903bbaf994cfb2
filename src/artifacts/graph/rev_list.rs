use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::SitResult;
use std::collections::HashSet;
use tracing::warn;

/// Lazy first-parent walk from a starting commit back to the root
///
/// Yields each commit once. A missing commit record is yielded as an error
/// and ends the walk; an id seen twice (corrupted history) ends it silently.
pub struct RevList<'r> {
    database: &'r Database,
    current_commit_oid: Option<ObjectId>,
    visited: HashSet<ObjectId>,
}

impl<'r> RevList<'r> {
    pub fn new(database: &'r Database, start: Option<ObjectId>) -> Self {
        RevList {
            database,
            current_commit_oid: start,
            visited: HashSet::new(),
        }
    }
}

impl Iterator for RevList<'_> {
    type Item = SitResult<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        if !self.visited.insert(commit_oid.clone()) {
            warn!(oid = %commit_oid, "commit history loops back on itself");
            return None;
        }

        let commit = self
            .database
            .load_commit(&commit_oid)
            .and_then(|text| Commit::parse(&text));

        match commit {
            Ok(commit) => {
                // Move to the parent commit for the next iteration
                self.current_commit_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
