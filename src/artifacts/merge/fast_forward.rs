use crate::areas::index::Index;
use crate::areas::refs::HeadRef;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::restore::TreeRestore;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{SitError, SitResult};
use derive_new::new;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    AlreadyUpToDate,
    FastForward {
        /// Previous tip, None when the branch had no commits
        from: Option<ObjectId>,
        to: ObjectId,
        missing_blobs: Vec<PathBuf>,
    },
}

#[derive(new)]
pub struct FastForward<'r> {
    repository: &'r Repository,
}

impl FastForward<'_> {
    /// Merge `target` into the current branch
    ///
    /// Order of effects on success: branch ref, then working tree, then index.
    pub fn run(&self, target: &BranchName, index: &mut Index) -> SitResult<MergeOutcome> {
        let refs = self.repository.refs();

        let target_oid = refs
            .read_branch(target)?
            .ok_or_else(|| SitError::BranchNotFound(target.to_string()))?;

        let current_branch = match refs.current_ref()? {
            Some(HeadRef::Branch(sym_ref)) => sym_ref.branch_name()?,
            Some(HeadRef::Detached(_)) => return Err(SitError::DetachedHeadOperation("merge")),
            None => return Err(SitError::NotARepository),
        };
        let current_oid = refs.read_branch(&current_branch)?;

        if current_oid.as_ref() == Some(&target_oid) {
            return Ok(MergeOutcome::AlreadyUpToDate);
        }

        let graph = self.repository.commit_graph();
        if let Some(current_oid) = &current_oid
            && !graph.is_ancestor(current_oid, &target_oid)?
        {
            return Err(SitError::UnsupportedMerge {
                current: current_branch.to_string(),
                target: target.to_string(),
            });
        }

        let commit = graph.load(&target_oid)?;
        let tree_restore =
            TreeRestore::new(self.repository.database(), self.repository.workspace());
        tree_restore.check_paths(commit.entries())?;

        refs.set_branch(&current_branch, &target_oid)?;
        debug!(branch = %current_branch, to = %target_oid, "fast-forwarded");

        let missing_blobs = tree_restore.restore(commit.entries())?;

        index.replace(commit.entries().iter().cloned());
        index.write_updates()?;

        Ok(MergeOutcome::FastForward {
            from: current_oid,
            to: target_oid,
            missing_blobs,
        })
    }
}
