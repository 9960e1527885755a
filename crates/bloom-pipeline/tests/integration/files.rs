//! File input and document wrapper conversion.

use bloom_pipeline::{Document, ProcessError};
use serde_json::json;

use crate::common::{Page, YAML_DOC, write_temp, yaml_factory};

#[test]
fn test_process_file() {
    let (_dir, path) = write_temp("hello.md", YAML_DOC);
    let doc = yaml_factory().process_file(&path).unwrap();

    assert_eq!(doc.get("title"), Some(&json!("Hello")));
    assert_eq!(doc.content(), "<h1>Hi</h1>\n");
}

#[test]
fn test_process_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.md");

    let err = yaml_factory().process_file(&path).unwrap_err();
    assert!(matches!(err, ProcessError::Io { path: ref reported, .. } if reported == &path));
}

#[test]
fn test_process_file_rejects_directory() {
    let dir = tempfile::tempdir().unwrap();
    let err = yaml_factory().process_file(dir.path()).unwrap_err();
    assert!(matches!(err, ProcessError::Io { .. }));
    assert!(err.to_string().contains("not a regular file"));
}

#[test]
fn test_process_into_wrapper() {
    let page: Page = yaml_factory().process_into(YAML_DOC).unwrap();
    assert_eq!(page.title.as_deref(), Some("Hello"));
    assert_eq!(page.html, "<h1>Hi</h1>\n");
}

#[test]
fn test_process_file_into_wrapper() {
    let (_dir, path) = write_temp("page.md", "No front matter here.");
    let page: Page = yaml_factory().process_file_into(&path).unwrap();
    assert_eq!(page.title, None);
    assert_eq!(page.html, "<p>No front matter here.</p>\n");

    let doc: Document = yaml_factory().process_file_into(&path).unwrap();
    assert!(doc.metadata().is_empty());
}
