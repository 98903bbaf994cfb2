//! Repository layout
//!
//! Bundles the work-tree root with every path derived from it, so that the
//! areas never build repository paths from global constants:
//!
//! ```text
//! <root>/.sit/objects/<digest>     blob contents
//! <root>/.sit/commits/<digest>     commit records
//! <root>/.sit/HEAD                 "ref: refs/heads/<name>" or a commit id
//! <root>/.sit/refs/heads/<name>    branch tips
//! <root>/.sit/index                staging area
//! ```

use std::path::{Path, PathBuf};

pub const SIT_DIR: &str = ".sit";

/// Environment variable holding extra comma-separated directory names to skip
pub const EXCLUDE_ENV: &str = "SIT_EXCLUDE";

/// Directories never scanned as part of the working tree
const DEFAULT_EXCLUDED_DIRS: [&str; 7] =
    [SIT_DIR, ".git", "build", "gradle", "target", ".gradle", ".idea"];

#[derive(Debug, Clone)]
pub struct RepositoryLayout {
    root: Box<Path>,
    excluded_dirs: Vec<String>,
}

impl RepositoryLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        RepositoryLayout {
            root: root.into().into_boxed_path(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// Layout with the default exclusions plus any listed in `SIT_EXCLUDE`
    pub fn from_env(root: impl Into<PathBuf>) -> Self {
        let layout = Self::new(root);

        match std::env::var(EXCLUDE_ENV) {
            Ok(extra) => layout.with_excluded_dirs(
                extra
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty()),
            ),
            Err(_) => layout,
        }
    }

    pub fn with_excluded_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for dir in dirs {
            let dir = dir.into();
            if !self.excluded_dirs.contains(&dir) {
                self.excluded_dirs.push(dir);
            }
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn excluded_dirs(&self) -> &[String] {
        &self.excluded_dirs
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_dirs.iter().any(|dir| dir == name)
    }

    pub fn sit_path(&self) -> Box<Path> {
        self.root.join(SIT_DIR).into_boxed_path()
    }

    pub fn objects_path(&self) -> Box<Path> {
        self.sit_path().join("objects").into_boxed_path()
    }

    pub fn commits_path(&self) -> Box<Path> {
        self.sit_path().join("commits").into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.sit_path().join("HEAD").into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.sit_path().join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    pub fn index_path(&self) -> Box<Path> {
        self.sit_path().join("index").into_boxed_path()
    }

    /// A repository exists iff its metadata directory does
    pub fn is_initialized(&self) -> bool {
        self.sit_path().is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn derives_every_path_from_the_root() {
        let layout = RepositoryLayout::new("/work");

        assert_eq!(layout.sit_path().as_ref(), Path::new("/work/.sit"));
        assert_eq!(layout.objects_path().as_ref(), Path::new("/work/.sit/objects"));
        assert_eq!(layout.commits_path().as_ref(), Path::new("/work/.sit/commits"));
        assert_eq!(layout.head_path().as_ref(), Path::new("/work/.sit/HEAD"));
        assert_eq!(layout.heads_path().as_ref(), Path::new("/work/.sit/refs/heads"));
        assert_eq!(layout.index_path().as_ref(), Path::new("/work/.sit/index"));
    }

    #[test]
    fn extra_exclusions_are_appended_once() {
        let layout = RepositoryLayout::new("/work").with_excluded_dirs(["node_modules", ".git"]);

        assert!(layout.is_excluded("node_modules"));
        assert!(layout.is_excluded(".sit"));
        assert!(!layout.is_excluded("src"));
        assert_eq!(
            layout.excluded_dirs().iter().filter(|d| *d == ".git").count(),
            1
        );
    }
}
