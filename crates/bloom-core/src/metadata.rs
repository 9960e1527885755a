//! Metadata values and the read-only view handed to content steps.
//!
//! Metadata is a string-keyed mapping of JSON-like [`Value`]s. Aggregators
//! produce typed scalars (booleans, integers, floats) where the source
//! format has them, so values are never constrained to strings.

use std::sync::Arc;

use serde::{Serialize, Serializer};

pub use serde_json::Value;

/// Metadata mapping, in source order.
pub type Metadata = serde_json::Map<String, Value>;

/// Short name of a value's kind, for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Shared, read-only view of a metadata mapping.
///
/// Cloning a view copies a reference, never the mapping. The type has no
/// mutating operations: once metadata enters the content stage it is frozen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataView {
    inner: Arc<Metadata>,
}

impl MetadataView {
    /// Wraps a metadata mapping.
    pub fn new(metadata: Metadata) -> Self {
        Self {
            inner: Arc::new(metadata),
        }
    }

    /// Looks up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    /// Whether the key exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Keys in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// Key/value pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Borrow the underlying mapping.
    pub fn as_metadata(&self) -> &Metadata {
        &self.inner
    }

    /// Copy the mapping out of the view.
    pub fn to_metadata(&self) -> Metadata {
        self.inner.as_ref().clone()
    }

    /// Whether two views share the same mapping allocation.
    pub fn ptr_eq(&self, other: &MetadataView) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Serialize for MetadataView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.inner.as_ref().serialize(serializer)
    }
}

impl From<Metadata> for MetadataView {
    fn from(metadata: Metadata) -> Self {
        Self::new(metadata)
    }
}
