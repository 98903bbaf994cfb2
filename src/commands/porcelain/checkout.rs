use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::switch::Checkout;
use crate::errors::SitResult;

impl Repository {
    pub async fn checkout(&mut self, target: &str) -> SitResult<()> {
        self.ensure_initialized()?;

        let branch = BranchName::try_parse(target.to_string())?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let outcome = Checkout::new(self).run(&branch, &mut index)?;

        for path in &outcome.missing_blobs {
            eprintln!("warning: could not restore {}: blob missing", path.display());
        }
        writeln!(self.writer(), "Switched to branch '{}'", outcome.branch)?;

        Ok(())
    }
}
