use crate::areas::refs::HeadRef;
use crate::areas::repository::Repository;
use crate::artifacts::graph::commit_graph::CommitGraph;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::errors::{SitError, SitResult};

impl Repository {
    pub async fn commit(&mut self, message: &str) -> SitResult<()> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        if index.is_empty() {
            return Err(SitError::NothingToCommit);
        }

        let branch = match self.refs().current_ref()? {
            Some(HeadRef::Branch(sym_ref)) => sym_ref.branch_name()?,
            Some(HeadRef::Detached(_)) => return Err(SitError::DetachedHeadOperation("commit")),
            None => return Err(SitError::NotARepository),
        };

        let parent = self.refs().head_commit_id()?;
        let author = Author::load_from_env();

        let (commit_id, text) =
            CommitGraph::build(message, parent.as_ref(), &author, index.entries());
        self.database().store_commit(&commit_id, &text)?;
        self.refs().update_head(&commit_id)?;

        let is_root = match parent {
            Some(_) => "",
            None => " (root-commit)",
        };

        writeln!(
            self.writer(),
            "[{}{} {}] {}",
            branch,
            is_root,
            commit_id.to_short_oid(),
            Commit::normalize_message(message)
        )?;

        Ok(())
    }
}
