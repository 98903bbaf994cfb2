use crate::areas::repository::Repository;
use crate::artifacts::branch::DEFAULT_BRANCH;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::SitResult;
use std::fs;

impl Repository {
    /// Create `.sit` with an empty object store and HEAD on the default branch
    ///
    /// Running it again reports the existing repository and changes nothing.
    pub async fn init(&mut self) -> SitResult<()> {
        let sit_path = self.layout().sit_path();

        if self.is_initialized() {
            writeln!(
                self.writer(),
                "Reinitialized existing Sit repository in {}",
                sit_path.display()
            )?;
            return Ok(());
        }

        fs::create_dir_all(self.database().objects_path())?;
        fs::create_dir_all(self.database().commits_path())?;
        fs::create_dir_all(self.refs().heads_path())?;

        self.refs()
            .attach_head(&BranchName::try_parse(DEFAULT_BRANCH.to_string())?)?;

        writeln!(
            self.writer(),
            "Initialized empty Sit repository in {}",
            sit_path.display()
        )?;

        Ok(())
    }
}
