use crate::areas::repository::Repository;
use crate::artifacts::diff::lcs::Edit;
use crate::artifacts::diff::workspace_diff::{FileDiff, WorkspaceDiff};
use crate::artifacts::objects::entry::path_to_entry_name;
use crate::errors::SitResult;
use colored::Colorize;

impl Repository {
    /// Show what changed in the working tree since the files were staged
    pub async fn diff(&mut self) -> SitResult<()> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let diffs = WorkspaceDiff::new(self.database(), self.workspace()).compute(&index)?;

        for file_diff in &diffs {
            self.print_file_diff(file_diff)?;
        }

        Ok(())
    }

    fn print_file_diff(&self, file_diff: &FileDiff) -> SitResult<()> {
        let name = path_to_entry_name(file_diff.path());

        writeln!(
            self.writer(),
            "{}",
            format!("diff --git a/{name} b/{name}").bold()
        )?;

        match file_diff {
            FileDiff::Deleted { .. } => {
                writeln!(self.writer(), "{}", "deleted file mode 100644".bold())?;
                writeln!(self.writer(), "{}", format!("--- a/{name}").bold())?;
                writeln!(self.writer(), "{}", "+++ /dev/null".bold())?;
            }
            FileDiff::Modified { edits, .. } => {
                writeln!(self.writer(), "{}", format!("--- a/{name}").bold())?;
                writeln!(self.writer(), "{}", format!("+++ b/{name}").bold())?;

                for edit in edits {
                    let line = match edit {
                        Edit::Insert { .. } => edit.to_string().green(),
                        Edit::Delete { .. } => edit.to_string().red(),
                    };
                    writeln!(self.writer(), "{}", line)?;
                }
            }
        }

        Ok(())
    }
}
