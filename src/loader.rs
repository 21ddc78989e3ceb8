use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::document::Document;
use crate::reader::{DocumentReader, ReadError, ReaderRegistry};
use crate::walker::{TraversalError, Walker};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Traversal(#[from] TraversalError),
    #[error(transparent)]
    Read(#[from] ReadError),
}

impl LoadError {
    /// The path whose walk step or read failed.
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Traversal(e) => e.path(),
            LoadError::Read(e) => e.path(),
        }
    }
}

/// Loads every file under a directory into documents.
///
/// Single-threaded and sequential: one walk step or one read is in
/// flight at a time, and output order is walk order.
#[derive(Debug, Default)]
pub struct DirectoryLoader {
    registry: ReaderRegistry,
}

impl DirectoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: ReaderRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ReaderRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ReaderRegistry {
        &mut self.registry
    }

    pub fn register(
        &mut self,
        extension: impl Into<String>,
        reader: Arc<dyn DocumentReader>,
    ) -> Option<Arc<dyn DocumentReader>> {
        self.registry.register(extension, reader)
    }

    /// Walk `root` and read each file, in walk order.
    ///
    /// The first traversal or read failure aborts the load; documents read
    /// before it are dropped.
    pub async fn load_data(&self, root: impl AsRef<Path>) -> Result<Vec<Document>, LoadError> {
        let root = root.as_ref();
        let mut walker = Walker::new(root);
        let mut docs = Vec::new();

        while let Some(path) = walker.next().await {
            let path: PathBuf = path?;
            let doc = self.registry.load(&path).await?;
            debug!(path = %path.display(), bytes = doc.text().len(), "Loaded document");
            docs.push(doc);
        }

        info!(root = %root.display(), documents = docs.len(), "Directory load complete");
        Ok(docs)
    }
}
