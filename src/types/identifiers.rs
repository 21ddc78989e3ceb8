use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Length of the prefix used when a document is named in log output.
pub const SHORT_ID_LEN: usize = 8;

/// Content-addressed document identifier: lowercase hex SHA-256.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Digest `text` followed by the serialized metadata entries.
    pub fn from_parts(text: &str, metadata_entries_json: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        hasher.update(metadata_entries_json.as_bytes());

        let hash = hasher.finalize();
        DocumentId(hex::encode(hash))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First [`SHORT_ID_LEN`] hex characters.
    pub fn short(&self) -> &str {
        // hex output is ASCII, so any byte index is a char boundary
        &self.0[..SHORT_ID_LEN.min(self.0.len())]
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
