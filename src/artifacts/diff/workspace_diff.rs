use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::workspace::Workspace;
use crate::artifacts::diff::lcs::{DiffAlgorithm, Edit, LcsDiff};
use crate::artifacts::objects::object::Object;
use crate::errors::SitResult;
use derive_new::new;
use std::path::PathBuf;
use tracing::warn;

/// How one tracked file differs from its staged version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileDiff {
    /// Gone from disk; reported whole, without a line diff
    Deleted { path: PathBuf },
    Modified {
        path: PathBuf,
        edits: Vec<Edit<String>>,
    },
}

impl FileDiff {
    pub fn path(&self) -> &PathBuf {
        match self {
            FileDiff::Deleted { path } | FileDiff::Modified { path, .. } => path,
        }
    }
}

/// Index against working tree, one entry per changed file in path order
#[derive(new)]
pub struct WorkspaceDiff<'r> {
    database: &'r Database,
    workspace: &'r Workspace,
}

impl WorkspaceDiff<'_> {
    pub fn compute(&self, index: &Index) -> SitResult<Vec<FileDiff>> {
        let mut diffs = Vec::new();

        for (path, staged_oid) in index.entries() {
            if !self.workspace.exists(path) {
                diffs.push(FileDiff::Deleted { path: path.clone() });
                continue;
            }

            let working = self.workspace.parse_blob(path)?;
            if &working.object_id() == staged_oid {
                continue;
            }

            let staged = match self.database.load_blob(staged_oid) {
                Ok(blob) => blob,
                Err(e) if e.is_object_missing() => {
                    warn!(path = %path.display(), oid = %staged_oid, "staged blob is missing, skipping diff");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let (a, b) = (staged.lines(), working.lines());
            diffs.push(FileDiff::Modified {
                path: path.clone(),
                edits: LcsDiff::new(&a, &b).diff(),
            });
        }

        Ok(diffs)
    }
}
