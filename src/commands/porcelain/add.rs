use crate::areas::repository::Repository;
use crate::errors::SitResult;
use std::path::Path;
use tracing::debug;

impl Repository {
    /// Stage files, expanding directories to every file beneath them
    ///
    /// Every path is resolved before anything is stored, so one bad path
    /// leaves the index untouched. Paths outside the working tree or inside
    /// an excluded directory count as bad.
    pub async fn add(&mut self, paths: &[String]) -> SitResult<()> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let files = paths
            .iter()
            .map(|path| self.workspace().list_files(Some(Path::new(path))))
            .collect::<SitResult<Vec<_>>>()?
            .into_iter()
            .flatten();

        for path in files {
            let blob = self.workspace().parse_blob(&path)?;
            let blob_id = self.database().store_blob(&blob)?;

            debug!(path = %path.display(), oid = %blob_id, "staged");
            index.add(path, blob_id);
        }

        index.write_updates()?;

        Ok(())
    }
}
