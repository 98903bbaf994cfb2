use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::SitResult;
use colored::Colorize;

impl Repository {
    /// List branches, marking the current one
    pub async fn list_branches(&mut self) -> SitResult<()> {
        self.ensure_initialized()?;

        let current = self
            .refs()
            .current_ref()?
            .and_then(|head_ref| head_ref.branch_name());

        for branch in self.refs().list_branches()? {
            if Some(&branch) == current.as_ref() {
                writeln!(self.writer(), "* {}", branch.to_string().green())?;
            } else {
                writeln!(self.writer(), "  {}", branch)?;
            }
        }

        Ok(())
    }

    /// Create a branch at the current HEAD commit
    pub async fn branch(&mut self, branch_name: &str) -> SitResult<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        self.refs().create_branch(&branch_name)?;

        writeln!(self.writer(), "Created branch '{}'", branch_name)?;

        Ok(())
    }
}
