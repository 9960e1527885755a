//! Shared fixtures for the integration tests.

use std::path::PathBuf;

use bloom_pipeline::{Aggregator, ContentChain, ContentFactory, Document, FromDocument};
use tempfile::TempDir;

/// A YAML document with a title, tags and a heading body.
pub const YAML_DOC: &str = "---\ntitle: Hello\ntags: [a, b]\n---\n\n# Hi";

/// Factory for YAML front matter with no pipelines.
pub fn yaml_factory() -> ContentFactory {
    ContentFactory::new(Aggregator::yaml())
}

/// Content chain that tags every paragraph with `class`.
pub fn tag_paragraphs(class: &'static str) -> ContentChain {
    ContentChain::new().append(move |ctx| {
        ctx.add_class("p", class)?;
        Ok(ctx)
    })
}

/// Writes `contents` to a file inside a fresh temporary directory.
///
/// The directory is returned so it outlives the test body.
pub fn write_temp(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write temp file");
    (dir, path)
}

/// Minimal application document type used for `process_into`.
#[derive(Debug)]
pub struct Page {
    pub title: Option<String>,
    pub html: String,
}

impl FromDocument for Page {
    fn from_document(document: Document) -> Self {
        let title = document
            .get("title")
            .and_then(|value| value.as_str())
            .map(str::to_string);
        let (_, html) = document.into_parts();
        Page { title, html }
    }
}
