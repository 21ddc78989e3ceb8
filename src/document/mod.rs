pub mod metadata;
pub mod document;

pub use crate::types::identifiers::DocumentId;
pub use metadata::Metadata;
pub use document::{Document, Node};
