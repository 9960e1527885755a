//! The processed document.

use serde::Serialize;

use crate::metadata::{Metadata, Value};

/// Result of processing one input: metadata plus rendered content.
///
/// Immutable once constructed; use [`Document::into_parts`] to take the
/// pieces apart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    metadata: Metadata,
    content: String,
}

impl Document {
    /// Creates a document.
    pub fn new(metadata: Metadata, content: impl Into<String>) -> Self {
        Self {
            metadata,
            content: content.into(),
        }
    }

    /// Metadata aggregated from the front matter (after the metadata pipeline).
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Rendered markup (after the content pipeline).
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Looks up a single metadata value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Takes the document apart.
    pub fn into_parts(self) -> (Metadata, String) {
        (self.metadata, self.content)
    }

    /// Converts the document into a caller-chosen wrapper type.
    pub fn into_document<D: FromDocument>(self) -> D {
        D::from_document(self)
    }
}

/// Conversion from a processed [`Document`] into an application type.
///
/// # Example
///
/// ```
/// use bloom_core::{Document, FromDocument, Metadata};
///
/// struct Page {
///     title: String,
///     html: String,
/// }
///
/// impl FromDocument for Page {
///     fn from_document(document: Document) -> Self {
///         let title = document
///             .get("title")
///             .and_then(|v| v.as_str())
///             .unwrap_or_default()
///             .to_string();
///         let (_, html) = document.into_parts();
///         Page { title, html }
///     }
/// }
///
/// let page: Page = Document::new(Metadata::new(), "<p>x</p>").into_document();
/// assert_eq!(page.title, "");
/// assert_eq!(page.html, "<p>x</p>");
/// ```
pub trait FromDocument: Sized {
    /// Builds `Self` from a processed document.
    fn from_document(document: Document) -> Self;
}

impl FromDocument for Document {
    fn from_document(document: Document) -> Self {
        document
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_accessors() {
        let mut metadata = Metadata::new();
        metadata.insert("title".to_string(), json!("Hello"));
        let doc = Document::new(metadata, "<h1>Hi</h1>");

        assert_eq!(doc.get("title"), Some(&json!("Hello")));
        assert_eq!(doc.content(), "<h1>Hi</h1>");
        assert_eq!(doc.metadata().len(), 1);
    }

    #[test]
    fn test_document_serializes_as_object() {
        let doc = Document::new(Metadata::new(), "body");
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value, json!({"metadata": {}, "content": "body"}));
    }

    #[test]
    fn test_into_document_identity() {
        let doc = Document::new(Metadata::new(), "x");
        let same: Document = doc.clone().into_document();
        assert_eq!(same, doc);
    }
}
