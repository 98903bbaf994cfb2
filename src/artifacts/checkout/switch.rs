use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::restore::TreeRestore;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{SitError, SitResult};
use derive_new::new;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOutcome {
    pub branch: BranchName,
    pub commit_oid: ObjectId,
    /// Files left unrestored because their blob is gone
    pub missing_blobs: Vec<PathBuf>,
}

#[derive(new)]
pub struct Checkout<'r> {
    repository: &'r Repository,
}

impl Checkout<'_> {
    /// Switch to `branch`
    ///
    /// Fails before touching anything when the branch does not exist or its
    /// commit record is gone.
    pub fn run(&self, branch: &BranchName, index: &mut Index) -> SitResult<CheckoutOutcome> {
        let refs = self.repository.refs();

        let commit_oid = refs
            .read_branch(branch)?
            .ok_or_else(|| SitError::BranchNotFound(branch.to_string()))?;
        let commit = self.repository.commit_graph().load(&commit_oid)?;

        let missing_blobs =
            TreeRestore::new(self.repository.database(), self.repository.workspace())
                .restore(commit.entries())?;

        index.replace(commit.entries().iter().cloned());
        index.write_updates()?;

        refs.attach_head(branch)?;

        Ok(CheckoutOutcome {
            branch: branch.clone(),
            commit_oid,
            missing_blobs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::areas::layout::RepositoryLayout;
    use crate::errors::ObjectKind;
    use assert_fs::TempDir;

    fn repository(dir: &TempDir) -> Repository {
        let repository = Repository::with_layout(
            RepositoryLayout::new(dir.path()),
            Box::new(std::io::sink()),
        );
        std::fs::create_dir_all(repository.layout().heads_path()).unwrap();
        repository
            .refs()
            .attach_head(&branch("main"))
            .unwrap();
        repository
    }

    fn branch(name: &str) -> BranchName {
        BranchName::try_parse(name.to_string()).unwrap()
    }

    #[test]
    fn unknown_branch_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let repository = repository(&dir);
        let mut index = Index::new(repository.layout().index_path());

        let err = Checkout::new(&repository)
            .run(&branch("nope"), &mut index)
            .unwrap_err();

        assert!(matches!(err, SitError::BranchNotFound(name) if name == "nope"));
        assert_eq!(
            repository.refs().current_ref().unwrap().unwrap().branch_name(),
            Some(branch("main"))
        );
        assert!(!repository.layout().index_path().exists());
    }

    #[test]
    fn missing_commit_record_aborts_before_any_change() {
        let dir = TempDir::new().unwrap();
        let repository = repository(&dir);
        let ghost = ObjectId::digest(b"ghost");
        repository.refs().set_branch(&branch("lost"), &ghost).unwrap();
        let mut index = Index::new(repository.layout().index_path());

        let err = Checkout::new(&repository)
            .run(&branch("lost"), &mut index)
            .unwrap_err();

        assert!(matches!(
            err,
            SitError::ObjectMissing {
                kind: ObjectKind::Commit,
                ..
            }
        ));
        assert_eq!(
            repository.refs().current_ref().unwrap().unwrap().branch_name(),
            Some(branch("main"))
        );
    }
}
