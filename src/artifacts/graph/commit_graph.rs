use crate::areas::database::Database;
use crate::artifacts::graph::rev_list::RevList;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::SitResult;
use derive_new::new;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(new)]
pub struct CommitGraph<'r> {
    database: &'r Database,
}

impl<'r> CommitGraph<'r> {
    /// Snapshot an index into a commit record
    ///
    /// # Arguments
    ///
    /// * `message` - commit message, collapsed onto one line
    /// * `parent` - current HEAD commit, None for a root commit
    /// * `author` - author name, email and date
    /// * `entries` - the index mapping, recorded in path order
    ///
    /// # Returns
    ///
    /// The commit id together with the exact text it is the digest of. Nothing
    /// is written.
    pub fn build(
        message: &str,
        parent: Option<&ObjectId>,
        author: &Author,
        entries: &BTreeMap<PathBuf, ObjectId>,
    ) -> (ObjectId, String) {
        let commit = Commit::new(
            parent.into_iter().cloned().collect(),
            author,
            message,
            entries
                .iter()
                .map(|(path, oid)| (path.clone(), oid.clone()))
                .collect(),
        );

        (commit.object_id(), commit.to_text())
    }

    pub fn load(&self, commit_oid: &ObjectId) -> SitResult<Commit> {
        let text = self.database.load_commit(commit_oid)?;
        Commit::parse(&text)
    }

    /// Parent ids in record order; the first one is the linear-history parent
    pub fn parents(&self, commit_oid: &ObjectId) -> SitResult<Vec<ObjectId>> {
        Ok(self.load(commit_oid)?.parents().to_vec())
    }

    /// File list of a commit, keyed by path
    pub fn tree(&self, commit_oid: &ObjectId) -> SitResult<BTreeMap<PathBuf, ObjectId>> {
        Ok(self.load(commit_oid)?.entries().iter().cloned().collect())
    }

    pub fn walk_ancestors(&self, start: Option<ObjectId>) -> RevList<'r> {
        RevList::new(self.database, start)
    }

    /// Whether `candidate` is reachable from `commit_oid` over parent edges
    ///
    /// Breadth-first over every parent, so merge commits are followed on all
    /// sides. A commit is its own ancestor. Unreadable commits contribute no
    /// parents.
    pub fn is_ancestor(&self, candidate: &ObjectId, commit_oid: &ObjectId) -> SitResult<bool> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([commit_oid.clone()]);

        while let Some(current) = queue.pop_front() {
            if &current == candidate {
                debug!(%candidate, commit = %commit_oid, "ancestor found");
                return Ok(true);
            }

            if !visited.insert(current.clone()) {
                continue;
            }

            match self.parents(&current) {
                Ok(parents) => queue.extend(
                    parents
                        .into_iter()
                        .filter(|parent| !visited.contains(parent)),
                ),
                Err(e) if e.is_object_missing() => {
                    warn!(oid = %current, "commit record missing during ancestry search");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    fn database(dir: &TempDir) -> Database {
        Database::new(
            dir.path().join("objects").into_boxed_path(),
            dir.path().join("commits").into_boxed_path(),
        )
    }

    fn author() -> Author {
        Author::new_with_date(
            "Jane".to_string(),
            "jane@example.com".to_string(),
            "2024-01-01T12:00:00.000".to_string(),
        )
    }

    fn store(database: &Database, message: &str, parents: Vec<ObjectId>) -> ObjectId {
        let commit = Commit::new(parents, &author(), message, vec![]);
        let oid = commit.object_id();
        database.store_commit(&oid, &commit.to_text()).unwrap();
        oid
    }

    #[test]
    fn build_is_deterministic() {
        let entries = BTreeMap::from([(PathBuf::from("a.txt"), ObjectId::digest(b"a"))]);

        let first = CommitGraph::build("msg", None, &author(), &entries);
        let second = CommitGraph::build("msg", None, &author(), &entries);

        assert_eq!(first, second);
        assert_eq!(first.0, ObjectId::digest(first.1.as_bytes()));
        assert!(!first.1.contains("parent: "));
    }

    #[test]
    fn ancestry_along_a_chain() {
        let dir = TempDir::new().unwrap();
        let database = database(&dir);
        let c0 = store(&database, "c0", vec![]);
        let c1 = store(&database, "c1", vec![c0.clone()]);
        let c2 = store(&database, "c2", vec![c1.clone()]);
        let graph = CommitGraph::new(&database);

        assert!(graph.is_ancestor(&c0, &c2).unwrap());
        assert!(!graph.is_ancestor(&c2, &c0).unwrap());
        assert!(graph.is_ancestor(&c1, &c1).unwrap());
    }

    #[test]
    fn ancestry_follows_every_parent_of_a_merge() {
        let dir = TempDir::new().unwrap();
        let database = database(&dir);
        let base = store(&database, "base", vec![]);
        let left = store(&database, "left", vec![base.clone()]);
        let right = store(&database, "right", vec![base.clone()]);
        let merge = store(&database, "merge", vec![left.clone(), right.clone()]);
        let graph = CommitGraph::new(&database);

        assert!(graph.is_ancestor(&right, &merge).unwrap());
        assert!(graph.is_ancestor(&base, &merge).unwrap());
        assert!(!graph.is_ancestor(&left, &right).unwrap());
    }

    #[test]
    fn corrupted_cycle_terminates_as_not_found() {
        let dir = TempDir::new().unwrap();
        let database = database(&dir);
        let a = ObjectId::digest(b"a");
        let b = ObjectId::digest(b"b");
        database
            .store_commit(&a, &format!("parent: {b}\nauthor: x\ndate: d\nmessage: a\n\n"))
            .unwrap();
        database
            .store_commit(&b, &format!("parent: {a}\nauthor: x\ndate: d\nmessage: b\n\n"))
            .unwrap();
        let graph = CommitGraph::new(&database);

        assert!(!graph.is_ancestor(&ObjectId::digest(b"elsewhere"), &a).unwrap());
        assert_eq!(graph.walk_ancestors(Some(a)).count(), 2);
    }

    #[test]
    fn missing_parent_ends_the_search_without_failing() {
        let dir = TempDir::new().unwrap();
        let database = database(&dir);
        let ghost = ObjectId::digest(b"ghost");
        let child = store(&database, "child", vec![ghost.clone()]);
        let graph = CommitGraph::new(&database);

        assert!(graph.is_ancestor(&ghost, &child).unwrap());
        assert!(!graph.is_ancestor(&ObjectId::digest(b"other"), &child).unwrap());
    }

    #[test]
    fn walk_yields_newest_first_and_reports_a_gap_once() {
        let dir = TempDir::new().unwrap();
        let database = database(&dir);
        let ghost = ObjectId::digest(b"ghost");
        let c1 = store(&database, "c1", vec![ghost]);
        let c2 = store(&database, "c2", vec![c1.clone()]);
        let graph = CommitGraph::new(&database);

        let walked = graph.walk_ancestors(Some(c2.clone())).collect::<Vec<_>>();

        assert_eq!(walked.len(), 3);
        assert_eq!(walked[0].as_ref().unwrap().0, c2);
        assert_eq!(walked[1].as_ref().unwrap().1.message(), "c1");
        assert!(walked[2].as_ref().unwrap_err().is_object_missing());
    }
}
