//! Index (staging area)
//!
//! The index tracks which blob each path will have in the next commit.
//!
//! ## Index File Format
//!
//! One `<path>:<blob-id>` line per entry, sorted by path, paths written with
//! `/` separators. Lines are split on their last colon, so paths may contain
//! colons. Saving an index that was just loaded rewrites identical bytes.

use crate::artifacts::objects::entry::{format_entry_line, parse_entry_line};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::SitResult;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Staging area
///
/// Maps repository-relative paths to blob ids. Every id recorded here has
/// already been written to the object database.
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.sit/index`)
    path: Box<Path>,
    /// Tracked files mapped by path
    entries: BTreeMap<PathBuf, ObjectId>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index from disk
    ///
    /// A missing index file is an empty index.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> SitResult<()> {
        self.entries.clear();

        if !self.path.exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(&self.path)?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        let mut content = String::new();
        lock.deref_mut().read_to_string(&mut content)?;

        self.entries = Self::parse(&content)?;
        debug!(entries = self.entries.len(), "loaded index");

        Ok(())
    }

    fn parse(content: &str) -> SitResult<BTreeMap<PathBuf, ObjectId>> {
        let mut entries = BTreeMap::new();

        for line in content.lines().filter(|line| !line.trim().is_empty()) {
            match parse_entry_line("index", line)? {
                Some((path, oid)) => {
                    entries.insert(path, oid);
                }
                None => {
                    return Err(crate::errors::SitError::MalformedRecord {
                        what: "index",
                        line: line.to_string(),
                    });
                }
            }
        }

        Ok(entries)
    }

    /// Serialized form, one sorted entry per line
    pub fn serialize(&self) -> String {
        self.entries
            .iter()
            .map(|(path, oid)| format!("{}\n", format_entry_line(path, oid)))
            .collect()
    }

    /// Write the index to disk
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the index file during writing.
    pub fn write_updates(&mut self) -> SitResult<()> {
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        lock.deref_mut().write_all(self.serialize().as_bytes())?;
        debug!(entries = self.entries.len(), "saved index");

        Ok(())
    }

    /// Insert or update one path
    pub fn add(&mut self, path: PathBuf, oid: ObjectId) {
        self.entries.insert(path, oid);
    }

    /// Swap the whole mapping, as checkout and merge do
    pub fn replace<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (PathBuf, ObjectId)>,
    {
        self.entries = entries.into_iter().collect();
    }

    pub fn get(&self, path: &Path) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn entries(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    fn index(dir: &TempDir) -> Index {
        Index::new(dir.path().join("index").into_boxed_path())
    }

    #[test]
    fn missing_index_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut index = index(&dir);

        index.rehydrate().unwrap();

        assert!(index.is_empty());
    }

    #[test]
    fn save_then_load_round_trips_in_sorted_order() {
        let dir = TempDir::new().unwrap();
        let mut index = index(&dir);
        index.add(PathBuf::from("z.txt"), ObjectId::digest(b"z"));
        index.add(PathBuf::from("a/b.txt"), ObjectId::digest(b"b"));
        index.add(PathBuf::from("odd:name"), ObjectId::digest(b"o"));
        index.write_updates().unwrap();

        let first = std::fs::read_to_string(index.path()).unwrap();

        let mut reloaded = Index::new(index.path().into());
        reloaded.rehydrate().unwrap();
        reloaded.write_updates().unwrap();
        let second = std::fs::read_to_string(reloaded.path()).unwrap();

        assert_eq!(reloaded.entries(), index.entries());
        assert_eq!(first, second);
        assert_eq!(
            first.lines().map(|l| l.split(':').next().unwrap()).collect::<Vec<_>>(),
            vec!["a/b.txt", "odd", "z.txt"]
        );
    }

    #[test]
    fn add_updates_an_existing_path() {
        let dir = TempDir::new().unwrap();
        let mut index = index(&dir);

        index.add(PathBuf::from("a.txt"), ObjectId::digest(b"1"));
        index.add(PathBuf::from("a.txt"), ObjectId::digest(b"2"));

        assert_eq!(index.len(), 1);
        assert_eq!(index.get(Path::new("a.txt")), Some(&ObjectId::digest(b"2")));
    }

    #[test]
    fn malformed_line_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut index = index(&dir);
        std::fs::write(index.path(), "no separator here\n").unwrap();

        assert!(index.rehydrate().is_err());
    }
}
