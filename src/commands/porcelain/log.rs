use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::SitResult;
use colored::Colorize;
use tracing::warn;

impl Repository {
    /// Walk first parents from HEAD, newest first
    ///
    /// A missing commit record ends the listing with a warning; what was
    /// already printed stays printed.
    pub async fn log(&mut self, oneline: bool) -> SitResult<()> {
        self.ensure_initialized()?;

        let Some(head_oid) = self.refs().head_commit_id()? else {
            writeln!(self.writer(), "No commits yet.")?;
            return Ok(());
        };

        for entry in self.commit_graph().walk_ancestors(Some(head_oid)) {
            match entry {
                Ok((commit_oid, commit)) if oneline => {
                    self.show_commit_oneline(&commit_oid, &commit)?
                }
                Ok((commit_oid, commit)) => self.show_commit_medium(&commit_oid, &commit)?,
                Err(e) if e.is_object_missing() => {
                    warn!("{e}, history ends here");
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }

    fn show_commit_medium(&self, commit_oid: &ObjectId, commit: &Commit) -> SitResult<()> {
        writeln!(
            self.writer(),
            "{}",
            format!("commit {}", commit_oid).yellow()
        )?;
        writeln!(self.writer(), "Author: {}", commit.author())?;
        writeln!(self.writer(), "Date:   {}", commit.date())?;
        writeln!(self.writer())?;
        writeln!(self.writer(), "    {}", commit.message())?;
        writeln!(self.writer())?;

        Ok(())
    }

    fn show_commit_oneline(&self, commit_oid: &ObjectId, commit: &Commit) -> SitResult<()> {
        writeln!(
            self.writer(),
            "{} {}",
            commit_oid.to_short_oid().yellow(),
            commit.message()
        )?;

        Ok(())
    }
}
