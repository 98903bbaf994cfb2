use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::entry::format_entry_line;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{SitError, SitResult};
use derive_new::new;
use std::path::PathBuf;
use tracing::debug;

/// Writes a commit's files onto the working tree
#[derive(new)]
pub struct TreeRestore<'r> {
    database: &'r Database,
    workspace: &'r Workspace,
}

impl TreeRestore<'_> {
    /// Reject a commit whose entries would land outside the working tree
    /// or inside an excluded directory
    pub fn check_paths(&self, entries: &[(PathBuf, ObjectId)]) -> SitResult<()> {
        for (path, oid) in entries {
            match self.workspace.resolve(path) {
                Ok(resolved) if !resolved.as_os_str().is_empty() => {}
                _ => {
                    return Err(SitError::MalformedRecord {
                        what: "commit",
                        line: format_entry_line(path, oid),
                    });
                }
            }
        }

        Ok(())
    }

    /// Write every entry's blob to its path, creating parent directories
    ///
    /// Nothing is written when any entry path fails `check_paths`.
    ///
    /// # Returns
    ///
    /// Paths whose blob could not be found; those files were left untouched
    pub fn restore(&self, entries: &[(PathBuf, ObjectId)]) -> SitResult<Vec<PathBuf>> {
        self.check_paths(entries)?;

        let mut missing_blobs = Vec::new();

        for (path, oid) in entries {
            match self.database.load_blob(oid) {
                Ok(blob) => self.workspace.write_file(path, blob.content())?,
                Err(e) if e.is_object_missing() => {
                    debug!(path = %path.display(), %oid, "blob missing, file not restored");
                    missing_blobs.push(path.clone());
                }
                Err(e) => return Err(e),
            }
        }

        Ok(missing_blobs)
    }
}
