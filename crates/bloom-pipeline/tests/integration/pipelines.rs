//! Metadata and content pipelines driven through the factory.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bloom_pipeline::{ContentChain, ContentFactory, DocumentContext, MetadataChain, ProcessError};
use serde_json::json;

use crate::common::{YAML_DOC, tag_paragraphs, yaml_factory};

// ----------------------------------------------------------------------------
// Metadata pipeline
// ----------------------------------------------------------------------------

#[test]
fn test_metadata_pipelines_run_in_order() {
    let first = MetadataChain::new().append(|mut meta| {
        meta["steps"] = json!(["first"]);
        Ok(meta)
    });
    let second = MetadataChain::new().append(|mut meta| {
        if let Some(steps) = meta["steps"].as_array_mut() {
            steps.push(json!("second"));
        }
        Ok(meta)
    });

    let doc = yaml_factory()
        .with_metadata_pipelines([first])
        .with_metadata_pipelines([second])
        .process(YAML_DOC)
        .unwrap();

    assert_eq!(doc.get("steps"), Some(&json!(["first", "second"])));
    assert_eq!(doc.get("title"), Some(&json!("Hello")));
}

#[test]
fn test_content_steps_see_pipeline_metadata() {
    let metadata = MetadataChain::new().append(|mut meta| {
        meta["accent"] = json!("warm");
        Ok(meta)
    });
    let content = ContentChain::new().append(|ctx| {
        let accent = ctx.get("accent")?.as_str().unwrap_or("none").to_string();
        ctx.add_class("h1", &accent)?;
        Ok(ctx)
    });

    let doc = yaml_factory()
        .with_metadata_pipelines([metadata])
        .with_content_pipelines([content])
        .process(YAML_DOC)
        .unwrap();

    assert_eq!(doc.content(), "<h1 class=\"warm\">Hi</h1>");
}

// ----------------------------------------------------------------------------
// Content pipeline
// ----------------------------------------------------------------------------

#[test]
fn test_content_chain_mutations_are_serialized() {
    let doc = yaml_factory()
        .with_content_pipelines([tag_paragraphs("lead")])
        .process("---\na: 1\n---\none\n\ntwo")
        .unwrap();

    assert_eq!(
        doc.content(),
        "<p class=\"lead\">one</p>\n<p class=\"lead\">two</p>"
    );
}

#[test]
fn test_scoped_add_and_remove_class() {
    let chain = ContentChain::new()
        .append(|ctx| {
            ctx.add_class("p", "x")?;
            Ok(ctx)
        })
        .append(|ctx| {
            ctx.remove_class("p", "a")?;
            Ok(ctx)
        });

    let doc = yaml_factory()
        .with_content_pipelines([chain])
        .process("<p class=\"a\"></p>\n<p class=\"b\"></p>")
        .unwrap();

    assert_eq!(doc.content(), "<p class=\"x\"></p>\n<p class=\"b x\"></p>");
}

#[test]
fn test_for_each_children_mutate_shared_tree() {
    let chain = ContentChain::new().append(|ctx: DocumentContext| {
        ctx.for_each("li", |item| {
            item.set_classes("li", ["item"])?;
            Ok(())
        })?;
        Ok(ctx)
    });

    let doc = yaml_factory()
        .with_content_pipelines([chain])
        .process("- one\n- two")
        .unwrap();

    assert!(doc.content().contains("<li class=\"item\">one</li>"));
    assert!(doc.content().contains("<li class=\"item\">two</li>"));
}

#[test]
fn test_metadata_refused_inside_content_pipeline() {
    let chain = ContentChain::new().append(|ctx| {
        ctx.set("title", json!("changed"))?;
        Ok(ctx)
    });

    let err = yaml_factory()
        .with_content_pipelines([chain])
        .process(YAML_DOC)
        .unwrap_err();

    assert!(matches!(err, ProcessError::ImmutableMetadata(ref e) if e.key == "title"));
}

#[test]
fn test_failing_step_short_circuits_later_steps() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let chain = ContentChain::new()
        .append(|_| Err(ProcessError::step("first step failed")))
        .append(move |ctx| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(ctx)
        });

    let err = yaml_factory()
        .with_content_pipelines([chain])
        .process(YAML_DOC)
        .unwrap_err();

    assert_eq!(err.to_string(), "Pipeline step failed: first step failed");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_factory_is_reusable() {
    let factory = yaml_factory().with_content_pipelines([tag_paragraphs("p")]);
    let first = factory.process("one").unwrap();
    let second = factory.process("two").unwrap();

    assert_eq!(first.content(), "<p class=\"p\">one</p>");
    assert_eq!(second.content(), "<p class=\"p\">two</p>");
}

#[test]
fn test_noop_content_chain_keeps_leading_style_block() {
    let input = "<style>p{color:red}</style>\n\nHello";
    let fast = ContentFactory::default().process(input).unwrap();
    assert_eq!(fast.content(), "<style>p{color:red}</style>\n<p>Hello</p>\n");

    let doc = ContentFactory::default()
        .with_content_pipelines([ContentChain::new().append(Ok)])
        .process(input)
        .unwrap();
    assert_eq!(doc.content(), "<style>p{color:red}</style>\n<p>Hello</p>");
}

#[test]
fn test_narrowed_steps_do_not_match_outer_ancestors() {
    let chain = ContentChain::new().append(|ctx: DocumentContext| {
        ctx.for_each("li", |item| {
            item.add_class("ul li", "nested")?;
            item.add_class("li", "item")?;
            Ok(())
        })?;
        Ok(ctx)
    });

    let doc = ContentFactory::default()
        .with_content_pipelines([chain])
        .process("- one")
        .unwrap();
    assert_eq!(doc.content(), "<ul>\n<li class=\"item\">one</li>\n</ul>");
}
