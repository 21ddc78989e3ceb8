//! Document identity and display.
//!
//! The identifier is `sha256(text ++ entries_json)` in lowercase hex, where
//! `entries_json` is the metadata rendered as an ordered `[key, value]` list.
//! It is memoized in a [`HashCache`] keyed by the canonical serialization of
//! the `(text, metadata)` pair.
//!
//! Displayed content is the metadata line followed by the text, cut to the
//! chunk-size threshold held in [`Settings`] when one is set. Cutting only
//! affects what [`IdentityModel::content`] returns; the identifier is always
//! computed from the full text.

pub mod content;

use tracing::warn;

use crate::cache::HashCache;
use crate::config::Settings;
use crate::document::{Document, Metadata};
use crate::types::identifiers::DocumentId;

pub use content::{ContentView, Truncation};

/// Uncached digest of a `(text, metadata)` pair.
pub fn hash_document(text: &str, metadata: &Metadata) -> DocumentId {
    DocumentId::from_parts(text, &metadata.entries_json())
}

/// Canonical cache key for a `(text, metadata)` pair: `[text, [[k, v], ...]]`.
pub fn canonical_key(text: &str, metadata: &Metadata) -> String {
    // Same infallibility argument as `Metadata::entries_json`.
    serde_json::to_string(&(text, metadata.entries())).unwrap_or_else(|_| {
        format!("{}\u{0}{}", text, metadata.entries_json())
    })
}

/// Computes identifiers and displayed content for documents.
///
/// Owns the hash cache and a clone of the shared [`Settings`] handle, so two
/// models built from clones of one handle observe the same threshold.
#[derive(Debug, Default)]
pub struct IdentityModel {
    settings: Settings,
    cache: HashCache,
}

impl IdentityModel {
    pub fn new(settings: Settings) -> Self {
        Self::with_cache(settings, HashCache::new())
    }

    pub fn with_cache(settings: Settings, cache: HashCache) -> Self {
        Self { settings, cache }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn cache(&self) -> &HashCache {
        &self.cache
    }

    pub fn id(&self, doc: &Document) -> DocumentId {
        let key = canonical_key(doc.text(), doc.metadata());
        self.cache
            .get_or_compute(key, || hash_document(doc.text(), doc.metadata()))
    }

    /// Content before any chunk-size cut.
    pub fn raw_content(&self, doc: &Document) -> String {
        let metadata = doc.metadata();
        let leading = (!metadata.is_empty()).then(|| metadata.entries_json());
        content::compose(doc.text(), leading)
    }

    pub fn content(&self, doc: &Document) -> String {
        self.content_view(doc).into_content()
    }

    /// Displayed content along with the truncation decision.
    ///
    /// Logs a warning when the content exceeds the threshold.
    pub fn content_view(&self, doc: &Document) -> ContentView {
        let view = content::truncate(self.raw_content(doc), self.settings.chunk_size());

        if let Some(t) = view.truncation {
            let id = self.id(doc);
            warn!(
                document = id.short(),
                length = t.original_len,
                chunk_size = t.chunk_size,
                overflow = t.overflow(),
                "Document ({}) is larger than chunk size: {}",
                id.short(),
                t.original_len
            );
            warn!("Truncating content...");
            warn!(
                "If you want to disable this warning: \
                 1. unset the chunk size (Settings::set_chunk_size(None)); \
                 2. set the chunk size to a larger value; \
                 3. split content into chunks before it reaches the document"
            );
        }

        view
    }
}
