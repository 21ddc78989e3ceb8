use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use moka::sync::Cache as MokaCache;

use crate::cache::policy::EvictionPolicy;
use crate::types::identifiers::DocumentId;

/// Memo table from a canonical `(text, metadata)` key to its digest.
///
/// The digest for a key is computed at most once while the key is resident,
/// including under concurrent lookups of the same key. Entries are only
/// dropped by the eviction policy or by [`HashCache::clear`].
pub struct HashCache {
    policy: EvictionPolicy,
    cache: MokaCache<String, DocumentId>,
    lookups: AtomicU64,
    computations: AtomicU64,
}

impl HashCache {
    pub fn new() -> Self {
        Self::with_policy(EvictionPolicy::Unbounded)
    }

    pub fn with_policy(policy: EvictionPolicy) -> Self {
        let mut builder = MokaCache::builder();
        if let Some(max) = policy.max_capacity() {
            builder = builder.max_capacity(max);
        }

        Self {
            policy,
            cache: builder.build(),
            lookups: AtomicU64::new(0),
            computations: AtomicU64::new(0),
        }
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// Return the cached digest for `key`, or run `compute` and remember it.
    pub fn get_or_compute<F>(&self, key: String, compute: F) -> DocumentId
    where
        F: FnOnce() -> DocumentId,
    {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.cache.get_with(key, || {
            self.computations.fetch_add(1, Ordering::Relaxed);
            compute()
        })
    }

    pub fn get(&self, key: &str) -> Option<DocumentId> {
        self.cache.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    /// Number of resident entries, after pending evictions are applied.
    pub fn len(&self) -> usize {
        self.cache.run_pending_tasks();
        self.cache.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of digests actually computed (cache misses).
    pub fn computations(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }

    pub fn hits(&self) -> u64 {
        self.lookups
            .load(Ordering::Relaxed)
            .saturating_sub(self.computations())
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
    }
}

impl Default for HashCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HashCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashCache")
            .field("policy", &self.policy)
            .field("entries", &self.cache.entry_count())
            .field("computations", &self.computations())
            .field("hits", &self.hits())
            .finish()
    }
}
