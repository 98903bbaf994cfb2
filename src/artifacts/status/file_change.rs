use colored::Colorize;

const LABEL_WIDTH: usize = 8;

/// How a path differs between the index and the working tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WorkspaceChangeType {
    #[default]
    None,
    Untracked,
    Modified,
    Deleted,
}

impl From<&WorkspaceChangeType> for &str {
    fn from(change: &WorkspaceChangeType) -> Self {
        match change {
            WorkspaceChangeType::None => " ",
            WorkspaceChangeType::Untracked => "?",
            WorkspaceChangeType::Modified => "M",
            WorkspaceChangeType::Deleted => "D",
        }
    }
}

/// How a path differs between HEAD and the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum IndexChangeType {
    #[default]
    None,
    Added,
    Modified,
}

impl From<&IndexChangeType> for &str {
    fn from(change: &IndexChangeType) -> Self {
        match change {
            IndexChangeType::None => " ",
            IndexChangeType::Added => "A",
            IndexChangeType::Modified => "M",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileChangeType {
    Workspace(WorkspaceChangeType),
    Index(IndexChangeType),
}

impl std::fmt::Display for FileChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let colored_str = match self {
            FileChangeType::Workspace(workspace_change) => match workspace_change {
                WorkspaceChangeType::None | WorkspaceChangeType::Untracked => "".normal(),
                WorkspaceChangeType::Modified => "modified:   ".red(),
                WorkspaceChangeType::Deleted => "deleted:    ".red(),
            },
            FileChangeType::Index(index_change) => match index_change {
                IndexChangeType::None => "".normal(),
                IndexChangeType::Added => "new file:   ".green(),
                IndexChangeType::Modified => "modified:   ".green(),
            },
        };
        write!(f, "{:>width$}{}", "", colored_str, width = LABEL_WIDTH)
    }
}

/// Both columns of a path's short status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct FileChange {
    pub(crate) index_change: IndexChangeType,
    pub(crate) workspace_change: WorkspaceChangeType,
}

impl FileChange {
    pub fn index_change(&self) -> IndexChangeType {
        self.index_change
    }

    pub fn workspace_change(&self) -> WorkspaceChangeType {
        self.workspace_change
    }
}

impl From<&FileChange> for String {
    fn from(change: &FileChange) -> Self {
        if change.workspace_change == WorkspaceChangeType::Untracked {
            return "??".to_string();
        }

        let index_str: &str = (&change.index_change).into();
        let workspace_str: &str = (&change.workspace_change).into();
        format!("{}{}", index_str, workspace_str)
    }
}

impl std::fmt::Display for FileChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let change_str: String = self.into();
        write!(f, "{}", change_str)
    }
}
