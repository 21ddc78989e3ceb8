use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use crate::document::Document;
use super::{DocumentReader, ReadError};

/// Fallback reader: the whole file as UTF-8 text, no metadata.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextReader;

#[async_trait]
impl DocumentReader for PlainTextReader {
    async fn load_data(&self, path: &Path) -> Result<Document, ReadError> {
        let raw = fs::read(path).await.map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let text = String::from_utf8(raw).map_err(|source| ReadError::InvalidUtf8 {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Document::new(text))
    }
}
