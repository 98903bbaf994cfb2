use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::{FileChange, IndexChangeType, WorkspaceChangeType};
use crate::artifacts::status::status_info::{FileSet, HeadTree, StatusInfo};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Three-way comparison of HEAD, the index and the working tree
///
/// Pure: every input is already loaded, nothing is read from disk here.
pub struct Inspector<'a> {
    head_tree: &'a HeadTree,
    index_entries: &'a BTreeMap<PathBuf, ObjectId>,
    workspace: &'a BTreeMap<PathBuf, ObjectId>,
}

impl<'a> Inspector<'a> {
    pub fn new(
        head_tree: &'a HeadTree,
        index_entries: &'a BTreeMap<PathBuf, ObjectId>,
        workspace: &'a BTreeMap<PathBuf, ObjectId>,
    ) -> Self {
        Inspector {
            head_tree,
            index_entries,
            workspace,
        }
    }

    pub fn check_index_against_workspace(
        index_oid: Option<&ObjectId>,
        workspace_oid: Option<&ObjectId>,
    ) -> WorkspaceChangeType {
        match (index_oid, workspace_oid) {
            (None, Some(_)) => WorkspaceChangeType::Untracked,
            (Some(_), None) => WorkspaceChangeType::Deleted,
            (Some(index_oid), Some(workspace_oid)) if index_oid != workspace_oid => {
                WorkspaceChangeType::Modified
            }
            _ => WorkspaceChangeType::None,
        }
    }

    pub fn check_index_against_head_tree(
        index_oid: Option<&ObjectId>,
        head_oid: Option<&ObjectId>,
    ) -> IndexChangeType {
        match (index_oid, head_oid) {
            (Some(_), None) => IndexChangeType::Added,
            (Some(index_oid), Some(head_oid)) if index_oid != head_oid => {
                IndexChangeType::Modified
            }
            _ => IndexChangeType::None,
        }
    }

    pub fn reconcile(&self) -> StatusInfo {
        let mut staged = FileSet::new();
        let mut modified = FileSet::new();
        let mut deleted = FileSet::new();
        let mut untracked = FileSet::new();
        let mut changed_files = BTreeMap::<PathBuf, FileChange>::new();

        for (path, index_oid) in self.index_entries {
            let index_change =
                Self::check_index_against_head_tree(Some(index_oid), self.head_tree.get(path));
            let workspace_change =
                Self::check_index_against_workspace(Some(index_oid), self.workspace.get(path));

            if index_change != IndexChangeType::None {
                staged.insert(path.clone());
            }
            match workspace_change {
                WorkspaceChangeType::Deleted => {
                    deleted.insert(path.clone());
                }
                WorkspaceChangeType::Modified => {
                    modified.insert(path.clone());
                }
                _ => {}
            }

            if index_change != IndexChangeType::None
                || workspace_change != WorkspaceChangeType::None
            {
                changed_files.insert(
                    path.clone(),
                    FileChange {
                        index_change,
                        workspace_change,
                    },
                );
            }
        }

        for path in self.workspace.keys() {
            if !self.index_entries.contains_key(path) {
                untracked.insert(path.clone());
                changed_files.insert(
                    path.clone(),
                    FileChange {
                        index_change: IndexChangeType::None,
                        workspace_change: WorkspaceChangeType::Untracked,
                    },
                );
            }
        }

        // removed from disk without the removal ever being staged
        for path in self.head_tree.keys() {
            if !self.index_entries.contains_key(path) && !self.workspace.contains_key(path) {
                deleted.insert(path.clone());
                changed_files.insert(
                    path.clone(),
                    FileChange {
                        index_change: IndexChangeType::None,
                        workspace_change: WorkspaceChangeType::Deleted,
                    },
                );
            }
        }

        StatusInfo {
            staged,
            modified,
            deleted,
            untracked,
            changed_files,
            head_tree: self.head_tree.clone(),
        }
    }
}
