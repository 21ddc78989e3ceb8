use crate::identity::IdentityModel;
use crate::types::identifiers::DocumentId;
use super::metadata::Metadata;

/// The atomic unit of ingested content.
///
/// A document only stores what it was built from. Its identifier and its
/// displayed content are derived on demand by an [`IdentityModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    metadata: Metadata,
}

impl Document {
    /// A document with empty metadata.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_metadata(text, Metadata::new())
    }

    pub fn with_metadata(text: impl Into<String>, metadata: Metadata) -> Self {
        Document {
            text: text.into(),
            metadata,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

/// Anything that exposes a content-addressed identifier and a display form.
pub trait Node {
    fn id(&self, identity: &IdentityModel) -> DocumentId;

    fn content(&self, identity: &IdentityModel) -> String;
}

impl Node for Document {
    fn id(&self, identity: &IdentityModel) -> DocumentId {
        identity.id(self)
    }

    fn content(&self, identity: &IdentityModel) -> String {
        identity.content(self)
    }
}
