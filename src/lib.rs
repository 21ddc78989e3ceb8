//! Directory ingestion into content-addressed documents.
//!
//! `context-ingest` walks a directory tree, dispatches each file to a reader
//! chosen by extension (plain text by default), and produces [`Document`]s
//! whose identifier is a SHA-256 digest of their text and ordered metadata.
//! Identifiers are memoized; displayed content can be capped by a shared
//! chunk-size threshold.
//!
//! ```no_run
//! use context_ingest::{DirectoryLoader, IdentityModel, Settings};
//!
//! # async fn run() -> Result<(), context_ingest::LoadError> {
//! let docs = DirectoryLoader::new().load_data("./data").await?;
//! let identity = IdentityModel::new(Settings::with_chunk_size(512));
//! for doc in &docs {
//!     println!("{} {}", identity.id(doc), identity.content(doc));
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod document;
pub mod identity;
pub mod loader;
pub mod reader;
pub mod types;
pub mod walker;

pub use cache::{EvictionPolicy, HashCache};
pub use config::{ConfigError, IngestConfig, Settings};
pub use document::{Document, DocumentId, Metadata, Node};
pub use identity::{ContentView, IdentityModel, Truncation};
pub use loader::{DirectoryLoader, LoadError};
pub use reader::{extension_key, DocumentReader, PlainTextReader, ReadError, ReaderRegistry};
pub use walker::{TraversalError, Walker};
