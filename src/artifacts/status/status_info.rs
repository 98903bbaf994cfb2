use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::{
    FileChange, FileChangeType, IndexChangeType, WorkspaceChangeType,
};
use crate::artifacts::status::inspector::Inspector;
use crate::errors::SitResult;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::warn;

pub type ChangeSet = BTreeMap<PathBuf, FileChangeType>;
pub type FileSet = BTreeSet<PathBuf>;
pub type HeadTree = BTreeMap<PathBuf, ObjectId>;

/// Result of reconciling HEAD, the index and the working tree
///
/// `staged`, `modified` and `untracked` never share a path with each other
/// except that a staged path can also be modified. `deleted` may overlap
/// `staged` (a staged file removed from disk).
#[derive(Debug, Clone)]
pub struct StatusInfo {
    pub(crate) staged: FileSet,
    pub(crate) modified: FileSet,
    pub(crate) deleted: FileSet,
    pub(crate) untracked: FileSet,
    pub(crate) changed_files: BTreeMap<PathBuf, FileChange>,
    pub(crate) head_tree: HeadTree,
}

impl StatusInfo {
    pub fn staged(&self) -> &FileSet {
        &self.staged
    }

    pub fn modified(&self) -> &FileSet {
        &self.modified
    }

    pub fn deleted(&self) -> &FileSet {
        &self.deleted
    }

    pub fn untracked(&self) -> &FileSet {
        &self.untracked
    }

    /// Short status of every path that differs somewhere, in path order
    pub fn changed_files(&self) -> &BTreeMap<PathBuf, FileChange> {
        &self.changed_files
    }

    pub fn is_clean(&self) -> bool {
        self.staged.is_empty()
            && self.modified.is_empty()
            && self.deleted.is_empty()
            && self.untracked.is_empty()
    }

    /// Whether a staged path is new relative to HEAD or replaces HEAD's version
    pub fn index_change(&self, path: &Path) -> IndexChangeType {
        if !self.staged.contains(path) {
            IndexChangeType::None
        } else if self.head_tree.contains_key(path) {
            IndexChangeType::Modified
        } else {
            IndexChangeType::Added
        }
    }

    /// Changes to be committed
    pub fn index_changeset(&self) -> ChangeSet {
        self.staged
            .iter()
            .map(|path| (path.clone(), FileChangeType::Index(self.index_change(path))))
            .collect()
    }

    /// Changes not staged for commit
    pub fn workspace_changeset(&self) -> ChangeSet {
        self.modified
            .iter()
            .map(|path| {
                (
                    path.clone(),
                    FileChangeType::Workspace(WorkspaceChangeType::Modified),
                )
            })
            .chain(self.deleted.iter().map(|path| {
                (
                    path.clone(),
                    FileChangeType::Workspace(WorkspaceChangeType::Deleted),
                )
            }))
            .collect()
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self, index: &Index) -> SitResult<StatusInfo> {
        let head_tree = self.load_head_tree()?;
        let workspace = self.repository.workspace().scan()?;

        Ok(Inspector::new(&head_tree, index.entries(), &workspace).reconcile())
    }

    /// Entries of the HEAD commit, empty before the first commit
    fn load_head_tree(&self) -> SitResult<HeadTree> {
        let Some(head_oid) = self.repository.refs().head_commit_id()? else {
            return Ok(HeadTree::new());
        };

        match self.repository.commit_graph().tree(&head_oid) {
            Ok(tree) => Ok(tree),
            Err(e) if e.is_object_missing() => {
                warn!(oid = %head_oid, "HEAD commit record is missing, comparing against an empty tree");
                Ok(HeadTree::new())
            }
            Err(e) => Err(e),
        }
    }
}
