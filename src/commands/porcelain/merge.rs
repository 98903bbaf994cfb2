use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::merge::fast_forward::{FastForward, MergeOutcome};
use crate::errors::SitResult;

impl Repository {
    /// Fast-forward the current branch to `target`
    pub async fn merge(&mut self, target: &str) -> SitResult<()> {
        self.ensure_initialized()?;

        let target = BranchName::try_parse(target.to_string())?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        match FastForward::new(self).run(&target, &mut index)? {
            MergeOutcome::AlreadyUpToDate => {
                writeln!(self.writer(), "Already up to date.")?;
            }
            MergeOutcome::FastForward {
                from,
                to,
                missing_blobs,
            } => {
                if let Some(from) = from {
                    writeln!(
                        self.writer(),
                        "Updating {}..{}",
                        from.to_short_oid(),
                        to.to_short_oid()
                    )?;
                }
                writeln!(self.writer(), "Fast-forward")?;

                for path in &missing_blobs {
                    eprintln!("warning: could not restore {}: blob missing", path.display());
                }
            }
        }

        Ok(())
    }
}
