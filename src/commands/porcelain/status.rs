use crate::areas::refs::HeadRef;
use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::{ChangeSet, StatusInfo};
use crate::errors::SitResult;
use colored::Colorize;

impl Repository {
    pub async fn status(&mut self, porcelain: bool) -> SitResult<()> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let status_info = self.status_report().initialize(&index)?;

        if porcelain {
            self.print_porcelain_format(&status_info)
        } else {
            self.print_long_format(&status_info)
        }
    }

    fn print_porcelain_format(&self, status_info: &StatusInfo) -> SitResult<()> {
        for (file, change) in status_info.changed_files() {
            writeln!(self.writer(), "{} {}", change, file.display())?;
        }

        Ok(())
    }

    fn print_long_format(&self, status_info: &StatusInfo) -> SitResult<()> {
        match self.refs().current_ref()? {
            Some(HeadRef::Branch(sym_ref)) => {
                writeln!(self.writer(), "On branch {}", sym_ref.branch_name()?)?
            }
            Some(HeadRef::Detached(oid)) => {
                writeln!(self.writer(), "HEAD detached at {}", oid.to_short_oid())?
            }
            None => {}
        }

        if status_info.is_clean() {
            writeln!(self.writer(), "nothing to commit, working tree clean")?;
            return Ok(());
        }

        self.print_changeset("Changes to be committed:", &status_info.index_changeset())?;
        self.print_changeset(
            "Changes not staged for commit:",
            &status_info.workspace_changeset(),
        )?;

        if !status_info.untracked().is_empty() {
            writeln!(self.writer(), "Untracked files:")?;
            for file in status_info.untracked() {
                writeln!(
                    self.writer(),
                    "{:>8}{}",
                    "",
                    file.display().to_string().red()
                )?;
            }
            writeln!(self.writer())?;
        }

        Ok(())
    }

    fn print_changeset(&self, title: &str, changeset: &ChangeSet) -> SitResult<()> {
        if changeset.is_empty() {
            return Ok(());
        }

        writeln!(self.writer(), "{}", title)?;
        for (file, change) in changeset {
            writeln!(self.writer(), "{}{}", change, file.display())?;
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
