use crate::areas::layout::RepositoryLayout;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{SitError, SitResult};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Working tree rooted at the repository root
///
/// Every path handed in or out is relative to the root.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
    excluded_dirs: Vec<String>,
}

impl Workspace {
    pub fn new(layout: &RepositoryLayout) -> Self {
        Workspace {
            path: layout.root().into(),
            excluded_dirs: layout.excluded_dirs().to_vec(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    /// Lexically normalize a user or record path to one relative to the root
    ///
    /// Absolute paths must lie under the root. `.` is dropped and `..` folds
    /// into its parent; a path that climbs out of the root, or that passes
    /// through an excluded directory such as `.sit`, fails with `PathNotFound`.
    /// The root itself resolves to an empty path.
    pub fn resolve(&self, file_path: &Path) -> SitResult<PathBuf> {
        let not_found = || SitError::PathNotFound(file_path.to_path_buf());

        let relative = if file_path.is_absolute() {
            file_path.strip_prefix(&self.path).map_err(|_| not_found())?
        } else {
            file_path
        };

        let mut resolved = PathBuf::new();
        for component in relative.components() {
            match component {
                Component::CurDir => {}
                Component::Normal(name) => resolved.push(name),
                Component::ParentDir => {
                    if !resolved.pop() {
                        return Err(not_found());
                    }
                }
                Component::RootDir | Component::Prefix(_) => return Err(not_found()),
            }
        }

        if self.passes_through_excluded(&resolved) {
            return Err(not_found());
        }

        Ok(resolved)
    }

    /// Whether any directory on the way to `relative` is excluded
    ///
    /// The last component counts only when it is itself a directory.
    fn passes_through_excluded(&self, relative: &Path) -> bool {
        let is_excluded_name =
            |name: &std::ffi::OsStr| self.excluded_dirs.iter().any(|dir| name == dir.as_str());

        let parents_excluded = relative
            .parent()
            .into_iter()
            .flat_map(Path::components)
            .any(|component| is_excluded_name(component.as_os_str()));

        parents_excluded
            || relative.file_name().is_some_and(|name| {
                is_excluded_name(name) && self.path.join(relative).is_dir()
            })
    }

    /// Every non-excluded file under `root_file_path` (the whole tree when None)
    ///
    /// A file path yields itself. A path that does not exist, leaves the root,
    /// or lies in an excluded directory fails with `PathNotFound`.
    pub fn list_files(&self, root_file_path: Option<&Path>) -> SitResult<Vec<PathBuf>> {
        let root_file_path = match root_file_path {
            Some(p) => self.path.join(self.resolve(p)?),
            None => self.path.to_path_buf(),
        };

        if !root_file_path.exists() {
            return Err(SitError::PathNotFound(
                root_file_path
                    .strip_prefix(&self.path)
                    .map(PathBuf::from)
                    .unwrap_or(root_file_path),
            ));
        }

        if root_file_path.is_file() {
            return Ok(root_file_path
                .strip_prefix(&self.path)
                .map(|p| vec![p.to_path_buf()])
                .unwrap_or_default());
        }

        let mut files = WalkDir::new(&root_file_path)
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(entry))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.path)
                    .ok()
                    .map(Path::to_path_buf)
            })
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self
                .excluded_dirs
                .iter()
                .any(|dir| entry.file_name().to_string_lossy() == dir.as_str())
    }

    pub fn read_file(&self, file_path: &Path) -> SitResult<Vec<u8>> {
        let content = std::fs::read(self.path.join(file_path))?;

        Ok(content)
    }

    pub fn parse_blob(&self, file_path: &Path) -> SitResult<Blob> {
        let data = self.read_file(file_path)?;
        Ok(Blob::from(data))
    }

    /// Write a file, creating its parent directories
    ///
    /// Refuses any path that `resolve` rejects, as well as the root itself.
    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> SitResult<()> {
        let resolved = self.resolve(file_path)?;
        if resolved.as_os_str().is_empty() {
            return Err(SitError::PathNotFound(file_path.to_path_buf()));
        }
        let file_path = self.path.join(resolved);

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(file_path, content)?;

        Ok(())
    }

    /// Digest of every working-tree file's current bytes
    pub fn scan(&self) -> SitResult<BTreeMap<PathBuf, ObjectId>> {
        self.list_files(None)?
            .into_iter()
            .map(|path| {
                let oid = self.parse_blob(&path)?.object_id();
                Ok((path, oid))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn list_files_skips_excluded_directories() {
        let dir = TempDir::new().unwrap();
        dir.child("a.txt").write_str("a").unwrap();
        dir.child("src/lib.rs").write_str("lib").unwrap();
        dir.child(".sit/HEAD").write_str("ref: refs/heads/main\n").unwrap();
        dir.child("target/debug/out").write_str("bin").unwrap();

        let workspace = Workspace::new(&RepositoryLayout::new(dir.path()));

        assert_eq!(
            workspace.list_files(None).unwrap(),
            vec![PathBuf::from("a.txt"), PathBuf::from("src/lib.rs")]
        );
    }

    #[test]
    fn list_files_of_a_single_file_or_missing_path() {
        let dir = TempDir::new().unwrap();
        dir.child("a.txt").write_str("a").unwrap();
        let workspace = Workspace::new(&RepositoryLayout::new(dir.path()));

        assert_eq!(
            workspace.list_files(Some(Path::new("a.txt"))).unwrap(),
            vec![PathBuf::from("a.txt")]
        );
        assert!(matches!(
            workspace.list_files(Some(Path::new("nope.txt"))),
            Err(SitError::PathNotFound(p)) if p == Path::new("nope.txt")
        ));
    }

    #[test]
    fn resolve_folds_dots_and_confines_to_the_root() {
        let dir = TempDir::new().unwrap();
        dir.child("a/1.txt").write_str("1").unwrap();
        dir.child(".sit/HEAD").write_str("ref: refs/heads/main\n").unwrap();
        let workspace = Workspace::new(&RepositoryLayout::new(dir.path()));

        assert_eq!(
            workspace.resolve(Path::new("./a/../a/1.txt")).unwrap(),
            PathBuf::from("a/1.txt")
        );
        assert_eq!(
            workspace.resolve(&dir.path().join("a/1.txt")).unwrap(),
            PathBuf::from("a/1.txt")
        );
        assert_eq!(workspace.resolve(Path::new(".")).unwrap(), PathBuf::new());

        for rejected in ["../x.txt", "a/../../x.txt", ".sit", ".sit/HEAD", "/elsewhere/x.txt"] {
            assert!(
                matches!(
                    workspace.resolve(Path::new(rejected)),
                    Err(SitError::PathNotFound(_))
                ),
                "{rejected}"
            );
        }
    }

    #[test]
    fn list_files_refuses_excluded_roots() {
        let dir = TempDir::new().unwrap();
        dir.child(".sit/HEAD").write_str("ref: refs/heads/main\n").unwrap();
        dir.child("target/out.txt").write_str("bin").unwrap();
        let workspace = Workspace::new(&RepositoryLayout::new(dir.path()));

        for excluded in [".sit", ".sit/HEAD", "target/out.txt"] {
            assert!(
                workspace.list_files(Some(Path::new(excluded))).is_err(),
                "{excluded}"
            );
        }
    }

    #[test]
    fn scan_hashes_current_bytes() {
        let dir = TempDir::new().unwrap();
        dir.child("a.txt").write_str("hello").unwrap();
        let workspace = Workspace::new(&RepositoryLayout::new(dir.path()));

        let scan = workspace.scan().unwrap();

        assert_eq!(scan.get(Path::new("a.txt")), Some(&ObjectId::digest(b"hello")));
    }

    #[test]
    fn write_file_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(&RepositoryLayout::new(dir.path()));

        workspace.write_file(Path::new("deep/er/f.txt"), b"x").unwrap();

        dir.child("deep/er/f.txt").assert("x");
    }
}
