use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered string-keyed metadata attached to a document.
///
/// Insertion order is significant: it drives the serialized entries list and
/// therefore the document identity. Re-inserting an existing key replaces the
/// value in place without moving the key. Equality is order-sensitive, like
/// the identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    inner: Map<String, Value>,
}

impl Metadata {
    pub fn new() -> Self {
        Metadata { inner: Map::new() }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.inner.insert(key.into(), value.into())
    }

    pub fn insert_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), Value::String(value.into()));
    }

    pub fn insert_number(&mut self, key: impl Into<String>, value: i64) {
        self.inner.insert(key.into(), Value::from(value));
    }

    // Keys from `other` win; keys new to `self` are appended in `other`'s order.
    pub fn merge(&mut self, other: Metadata) {
        for (k, v) in other.inner {
            self.inner.insert(k, v);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// The metadata as an ordered list of `[key, value]` pairs.
    pub fn entries(&self) -> Vec<(&str, &Value)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v)).collect()
    }

    /// JSON rendering of [`Metadata::entries`], e.g. `[["title","a"],["n",1]]`.
    ///
    /// An empty mapping renders as `[]`.
    pub fn entries_json(&self) -> String {
        // A list of (&str, &Value) tuples has no non-string map keys and no
        // fallible Serialize impls, so serde_json cannot reject it.
        serde_json::to_string(&self.entries()).unwrap_or_else(|_| String::from("[]"))
    }
}

impl PartialEq for Metadata {
    fn eq(&self, other: &Self) -> bool {
        self.inner.iter().eq(other.inner.iter())
    }
}

impl Eq for Metadata {}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (k, v) in iter {
            metadata.insert(k, v);
        }
        metadata
    }
}
