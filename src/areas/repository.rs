use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::layout::RepositoryLayout;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::graph::commit_graph::CommitGraph;
use crate::artifacts::status::status_info::Status;
use crate::errors::{SitError, SitResult};
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Composition root
///
/// Builds every area once from a [`RepositoryLayout`] and hands them to the
/// engines. Command output goes through `writer`, so tests can capture it.
pub struct Repository {
    layout: RepositoryLayout,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> SitResult<Self> {
        let path = Path::new(path);

        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }

        let path = path.canonicalize()?;

        Ok(Self::with_layout(RepositoryLayout::from_env(path), writer))
    }

    pub fn with_layout(layout: RepositoryLayout, writer: Box<dyn std::io::Write>) -> Self {
        let index = Index::new(layout.index_path());
        let database = Database::new(layout.objects_path(), layout.commits_path());
        let workspace = Workspace::new(&layout);
        let refs = Refs::new(&layout);

        Repository {
            layout,
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
        }
    }

    pub fn path(&self) -> &Path {
        self.layout.root()
    }

    pub fn layout(&self) -> &RepositoryLayout {
        &self.layout
    }

    pub fn is_initialized(&self) -> bool {
        self.layout.is_initialized()
    }

    /// Every command but `init` starts here
    pub fn ensure_initialized(&self) -> SitResult<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(SitError::NotARepository)
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn commit_graph(&'_ self) -> CommitGraph<'_> {
        CommitGraph::new(&self.database)
    }

    pub fn status_report(&'_ self) -> Status<'_> {
        Status::new(self)
    }
}
