//! Reading capabilities: turning a file path into a [`Document`].

pub mod plaintext;
pub mod registry;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::document::Document;

pub use plaintext::PlainTextReader;
pub use registry::ReaderRegistry;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Content of {path} must be valid UTF-8")]
    InvalidUtf8 {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },
    #[error("Cannot decode {path}: {message}")]
    Other { path: PathBuf, message: String },
}

impl ReadError {
    pub fn path(&self) -> &Path {
        match self {
            ReadError::Io { path, .. }
            | ReadError::InvalidUtf8 { path, .. }
            | ReadError::Other { path, .. } => path,
        }
    }
}

/// Converts the file at a path into a document.
#[async_trait]
pub trait DocumentReader: Send + Sync {
    async fn load_data(&self, path: &Path) -> Result<Document, ReadError>;
}

/// Registry key for a path: the final dot-segment of the file name including
/// the dot (`"notes.md"` → `".md"`, `"a.tar.gz"` → `".gz"`).
///
/// Names without a dot, and names whose only dot is the leading one
/// (`".bashrc"`), have the empty key. A trailing dot gives `"."`.
pub fn extension_key(path: &Path) -> String {
    let Some(name) = path.file_name() else {
        return String::new();
    };
    let name = name.to_string_lossy();

    match name.rfind('.') {
        Some(0) | None => String::new(),
        Some(idx) => name[idx..].to_string(),
    }
}
