use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{SitError, SitResult};
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Content-addressed store for blobs and commit records
///
/// Blobs and commits live in separate directories but share one id space.
/// Objects are only ever added: an existing object is never rewritten.
#[derive(Debug)]
pub struct Database {
    objects_path: Box<Path>,
    commits_path: Box<Path>,
}

// TODO: implement packfiles for better performance and storage efficiency
impl Database {
    pub fn new(objects_path: Box<Path>, commits_path: Box<Path>) -> Self {
        Database {
            objects_path,
            commits_path,
        }
    }

    pub fn objects_path(&self) -> &Path {
        &self.objects_path
    }

    pub fn commits_path(&self) -> &Path {
        &self.commits_path
    }

    /// Store a blob unless an identical one is already present
    ///
    /// # Returns
    ///
    /// The blob's id, whether or not anything was written
    pub fn store_blob(&self, blob: &Blob) -> SitResult<ObjectId> {
        let object_id = blob.object_id();
        let object_path = self.objects_path.join(object_id.as_ref());

        if !object_path.exists() {
            self.write_object(object_path, &blob.serialize())?;
            debug!(oid = %object_id, "stored blob");
        }

        Ok(object_id)
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> SitResult<Blob> {
        let object_path = self.objects_path.join(object_id.as_ref());

        match Self::read_object(&object_path)? {
            Some(content) => Ok(Blob::from(content)),
            None => Err(SitError::missing_blob(object_id)),
        }
    }

    pub fn has_blob(&self, object_id: &ObjectId) -> bool {
        self.objects_path.join(object_id.as_ref()).is_file()
    }

    /// Store a serialized commit record under its id
    pub fn store_commit(&self, object_id: &ObjectId, content: &str) -> SitResult<()> {
        let object_path = self.commits_path.join(object_id.as_ref());

        if !object_path.exists() {
            self.write_object(object_path, content.as_bytes())?;
            debug!(oid = %object_id, "stored commit");
        }

        Ok(())
    }

    pub fn load_commit(&self, object_id: &ObjectId) -> SitResult<String> {
        let object_path = self.commits_path.join(object_id.as_ref());

        match Self::read_object(&object_path)? {
            Some(content) => Ok(String::from_utf8_lossy(&content).into_owned()),
            None => Err(SitError::missing_commit(object_id)),
        }
    }

    pub fn has_commit(&self, object_id: &ObjectId) -> bool {
        self.commits_path.join(object_id.as_ref()).is_file()
    }

    fn read_object(object_path: &Path) -> SitResult<Option<Vec<u8>>> {
        match std::fs::read(object_path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_object(&self, object_path: PathBuf, content: &[u8]) -> SitResult<()> {
        let object_dir = object_path.parent().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid object path {}", object_path.display()),
            )
        })?;
        std::fs::create_dir_all(object_dir)?;

        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)?;
        file.write_all(content)?;
        file.sync_all()?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path)?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
