//! Error types for repository operations.
//!
//! Every fallible operation in the library returns [`SitResult`]. Structural
//! errors are raised before anything is written, so a failed command leaves
//! the repository exactly as it found it.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;
use thiserror::Error;

/// Which object namespace a missing id was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Blob,
    Commit,
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectKind::Blob => write!(f, "blob"),
            ObjectKind::Commit => write!(f, "commit"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SitError {
    #[error("not a sit repository (or any of the parent directories): .sit")]
    NotARepository,

    #[error("branch '{0}' not found")]
    BranchNotFound(String),

    #[error("branch '{0}' already exists")]
    BranchExists(String),

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("no commits yet, cannot create branch")]
    NoCommitsYet,

    #[error("nothing to commit (create/copy files and use \"sit add\" to track)")]
    NothingToCommit,

    #[error("pathspec '{}' did not match any files", .0.display())]
    PathNotFound(PathBuf),

    #[error("{kind} object {id} is missing")]
    ObjectMissing { kind: ObjectKind, id: ObjectId },

    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("malformed {what} record: {line}")]
    MalformedRecord { what: &'static str, line: String },

    /// A branch-scoped operation was attempted while HEAD points at a commit.
    #[error("HEAD is detached, {0} requires a checked-out branch")]
    DetachedHeadOperation(&'static str),

    #[error(
        "cannot fast-forward {current} to {target}: non-fast-forward merges are not supported"
    )]
    UnsupportedMerge { current: String, target: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SitError {
    pub fn missing_blob(id: &ObjectId) -> Self {
        SitError::ObjectMissing {
            kind: ObjectKind::Blob,
            id: id.clone(),
        }
    }

    pub fn missing_commit(id: &ObjectId) -> Self {
        SitError::ObjectMissing {
            kind: ObjectKind::Commit,
            id: id.clone(),
        }
    }

    /// `true` for the warning-class condition of a referenced object that is gone.
    pub fn is_object_missing(&self) -> bool {
        matches!(self, SitError::ObjectMissing { .. })
    }
}

pub type SitResult<T> = std::result::Result<T, SitError>;
