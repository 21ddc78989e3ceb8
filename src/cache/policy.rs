use serde::{Deserialize, Serialize};

// Key point:
// Serializable
// Comparable
// Explicit default (unbounded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum EvictionPolicy {
    /// Keep every digest for the lifetime of the cache.
    #[default]
    Unbounded,
    /// Keep at most `n` digests. Which entry goes first is up to the cache.
    MaxEntries(usize),
}

impl EvictionPolicy {
    /// Entry bound handed to the cache builder, `None` when unbounded.
    pub fn max_capacity(&self) -> Option<u64> {
        match self {
            EvictionPolicy::Unbounded => None,
            EvictionPolicy::MaxEntries(max) => Some(*max as u64),
        }
    }
}
