use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::document::Document;
use super::{extension_key, DocumentReader, PlainTextReader, ReadError};

/// Extension-keyed dispatch to reading capabilities, with a plain-text fallback.
///
/// Keys include the leading dot and are matched case-sensitively. The last
/// registration for a key wins; there is no removal.
#[derive(Default)]
pub struct ReaderRegistry {
    readers: HashMap<String, Arc<dyn DocumentReader>>,
    fallback: PlainTextReader,
}

impl ReaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `reader` for `extension` (e.g. `".pdf"`), returning the reader
    /// it replaces.
    pub fn register(
        &mut self,
        extension: impl Into<String>,
        reader: Arc<dyn DocumentReader>,
    ) -> Option<Arc<dyn DocumentReader>> {
        self.readers.insert(extension.into(), reader)
    }

    pub fn is_registered(&self, extension: &str) -> bool {
        self.readers.contains_key(extension)
    }

    /// Registered extensions, sorted.
    pub fn extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.readers.keys().map(String::as_str).collect();
        exts.sort_unstable();
        exts
    }

    pub fn fallback(&self) -> &PlainTextReader {
        &self.fallback
    }

    /// The reader responsible for `path`.
    pub fn resolve(&self, path: &Path) -> &dyn DocumentReader {
        match self.readers.get(&extension_key(path)) {
            Some(reader) => reader.as_ref(),
            None => &self.fallback,
        }
    }

    /// Read `path` with its resolved reader. A failure is returned as is; the
    /// fallback is never tried in place of a registered reader.
    pub async fn load(&self, path: &Path) -> Result<Document, ReadError> {
        let ext = extension_key(path);
        debug!(
            path = %path.display(),
            extension = %ext,
            registered = self.readers.contains_key(&ext),
            "Dispatching file"
        );
        self.resolve(path).load_data(path).await
    }
}

impl fmt::Debug for ReaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderRegistry")
            .field("extensions", &self.extensions())
            .field("fallback", &self.fallback)
            .finish()
    }
}
