//! References (HEAD and branches)
//!
//! References are human-readable names pointing to commits:
//! - HEAD: the current branch (`ref: refs/heads/<name>`) or, when detached,
//!   a raw commit id
//! - Branches: `refs/heads/<name>` files containing a commit id
//!
//! An attached HEAD whose branch file does not exist yet is a branch with no
//! commits; that is the state of every freshly initialized repository.

use crate::areas::layout::RepositoryLayout;
use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{SitError, SitResult};
use file_guard::Lock;
use std::collections::BTreeSet;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// What HEAD currently points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadRef {
    /// Attached to a branch ref, e.g. `refs/heads/main`
    Branch(SymRefName),
    /// Pointing straight at a commit
    Detached(ObjectId),
}

impl HeadRef {
    fn parse(content: &str) -> SitResult<Self> {
        static SYMREF: OnceLock<regex::Regex> = OnceLock::new();
        let symref = SYMREF
            .get_or_init(|| regex::Regex::new(SYMREF_REGEX).expect("symref regex is valid"));

        match symref.captures(content) {
            Some(captures) => Ok(HeadRef::Branch(SymRefName::new(
                captures[1].trim().to_string(),
            ))),
            None => Ok(HeadRef::Detached(ObjectId::try_parse(content.to_string())?)),
        }
    }

    /// Branch name when attached
    pub fn branch_name(&self) -> Option<BranchName> {
        match self {
            HeadRef::Branch(sym_ref) => sym_ref.branch_name().ok(),
            HeadRef::Detached(_) => None,
        }
    }
}

/// References manager
///
/// Handles reading and writing HEAD and branch refs. Writes hold an
/// exclusive advisory lock on the ref file.
#[derive(Debug)]
pub struct Refs {
    /// Path to the metadata directory (typically `.sit`)
    path: Box<Path>,
    head_path: Box<Path>,
    heads_path: Box<Path>,
}

impl Refs {
    pub fn new(layout: &RepositoryLayout) -> Self {
        Refs {
            path: layout.sit_path(),
            head_path: layout.head_path(),
            heads_path: layout.heads_path(),
        }
    }

    pub fn head_path(&self) -> &Path {
        &self.head_path
    }

    pub fn heads_path(&self) -> &Path {
        &self.heads_path
    }

    /// Parse HEAD
    ///
    /// # Returns
    ///
    /// None if HEAD does not exist or is empty
    pub fn current_ref(&self) -> SitResult<Option<HeadRef>> {
        match Self::read_ref_file(&self.head_path)? {
            Some(content) => Ok(Some(HeadRef::parse(&content)?)),
            None => Ok(None),
        }
    }

    /// Resolve HEAD to a commit id
    ///
    /// # Returns
    ///
    /// None when the current branch has no commits yet
    pub fn head_commit_id(&self) -> SitResult<Option<ObjectId>> {
        match self.current_ref()? {
            Some(HeadRef::Branch(sym_ref)) => self.read_sym_ref(&sym_ref),
            Some(HeadRef::Detached(oid)) => Ok(Some(oid)),
            None => Ok(None),
        }
    }

    /// Advance the current branch to a new commit
    ///
    /// Fails with `DetachedHeadOperation` when HEAD is not on a branch.
    pub fn update_head(&self, oid: &ObjectId) -> SitResult<()> {
        match self.current_ref()? {
            Some(HeadRef::Branch(sym_ref)) => {
                self.update_ref_file(&self.path.join(sym_ref.as_ref_path()), oid.as_ref())
            }
            Some(HeadRef::Detached(_)) => Err(SitError::DetachedHeadOperation("commit")),
            None => Err(SitError::NotARepository),
        }
    }

    /// Point HEAD at a branch
    pub fn attach_head(&self, branch_name: &BranchName) -> SitResult<()> {
        let sym_ref = SymRefName::from(branch_name);
        self.update_ref_file(&self.head_path, &format!("ref: {sym_ref}\n"))
    }

    pub fn read_branch(&self, branch_name: &BranchName) -> SitResult<Option<ObjectId>> {
        self.read_sym_ref(&SymRefName::from(branch_name))
    }

    pub fn set_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> SitResult<()> {
        self.update_ref_file(&self.branch_path(branch_name), oid.as_ref())
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.branch_path(branch_name).is_file()
    }

    /// Create a branch at the current HEAD commit
    pub fn create_branch(&self, branch_name: &BranchName) -> SitResult<ObjectId> {
        if self.branch_exists(branch_name) {
            return Err(SitError::BranchExists(branch_name.to_string()));
        }

        let head_oid = self.head_commit_id()?.ok_or(SitError::NoCommitsYet)?;
        self.set_branch(branch_name, &head_oid)?;

        Ok(head_oid)
    }

    /// All branch names under `refs/heads`, sorted
    pub fn list_branches(&self) -> SitResult<BTreeSet<BranchName>> {
        Ok(WalkDir::new(&self.heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&self.heads_path).ok()?;
                let name = relative_path
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                BranchName::try_parse(name).ok()
            })
            .collect())
    }

    fn branch_path(&self, branch_name: &BranchName) -> Box<Path> {
        self.heads_path.join(branch_name.as_ref()).into_boxed_path()
    }

    fn read_sym_ref(&self, sym_ref: &SymRefName) -> SitResult<Option<ObjectId>> {
        match Self::read_ref_file(&self.path.join(sym_ref.as_ref_path()))? {
            Some(content) => Ok(Some(ObjectId::try_parse(content)?)),
            None => Ok(None),
        }
    }

    fn read_ref_file(path: &Path) -> SitResult<Option<String>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let content = content.trim();

        if content.is_empty() {
            Ok(None)
        } else {
            Ok(Some(content.to_string()))
        }
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> SitResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        debug!(path = %path.display(), value = raw_ref.trim(), "updated ref");

        Ok(())
    }
}
