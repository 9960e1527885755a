//! End-to-end aggregation for each front matter format.

use bloom_content::{IniMode, IniOptions, JsonOptions};
use bloom_pipeline::{Aggregator, ContentFactory, Divider, MarkdownRenderer, Renderer, Value};
use serde_json::json;

use crate::common::{YAML_DOC, yaml_factory};

fn metadata_of(factory: &ContentFactory, input: &str) -> Value {
    Value::Object(factory.process(input).unwrap().metadata().clone())
}

// ----------------------------------------------------------------------------
// YAML
// ----------------------------------------------------------------------------

#[test]
fn test_yaml_end_to_end() {
    let doc = yaml_factory().process(YAML_DOC).unwrap();

    assert_eq!(
        Value::Object(doc.metadata().clone()),
        json!({"title": "Hello", "tags": ["a", "b"]})
    );
    assert_eq!(doc.content(), MarkdownRenderer::new().render("# Hi"));
    assert!(!doc.content().starts_with('\n'));
}

#[test]
fn test_no_front_matter_is_idempotent_for_every_format() {
    let input = "# Title\n\nSome *text*.";
    let expected = MarkdownRenderer::new().render(input);

    for aggregator in [
        Aggregator::None,
        Aggregator::ini(),
        Aggregator::json(),
        Aggregator::yaml(),
        Aggregator::toml(),
    ] {
        let doc = ContentFactory::new(aggregator).process(input).unwrap();
        assert!(doc.metadata().is_empty());
        assert_eq!(doc.content(), expected);
    }
}

#[test]
fn test_none_renders_front_matter_as_body() {
    let doc = ContentFactory::default().process("---\na: 1\n---\nbody").unwrap();
    assert!(doc.metadata().is_empty());
    assert!(doc.content().contains("body"));
    assert!(doc.content().contains("a: 1"));
}

#[test]
fn test_empty_front_matter_block() {
    let doc = yaml_factory().process("---\n---\nText").unwrap();
    assert!(doc.metadata().is_empty());
    assert_eq!(doc.content(), "<p>Text</p>\n");
}

// ----------------------------------------------------------------------------
// Other formats
// ----------------------------------------------------------------------------

#[test]
fn test_ini_typed_with_sections() {
    let options = IniOptions::new().mode(IniMode::Typed).sections(true);
    let factory = ContentFactory::new(Aggregator::Ini(options));
    let input = "---\ntitle = Notes\ndraft = no\n[author]\nname = Ada\n---\nBody";

    assert_eq!(
        metadata_of(&factory, input),
        json!({"title": "Notes", "draft": false, "author": {"name": "Ada"}})
    );
}

#[test]
fn test_json_round_trip() {
    let meta = json!({"title": "Hello", "weight": 2, "tags": ["x"], "nested": {"ok": true}});
    let input = format!("---\n{meta}\n---\nBody");
    let factory = ContentFactory::new(Aggregator::Json(JsonOptions::new()));

    assert_eq!(metadata_of(&factory, &input), meta);
}

#[test]
fn test_toml_with_plus_fence() {
    let factory =
        ContentFactory::new(Aggregator::toml()).with_divider(Divider::fence("+++").unwrap());
    let input = "+++\ntitle = \"Hello\"\ntags = [\"a\", \"b\"]\n+++\n# Hi";

    let doc = factory.process(input).unwrap();
    assert_eq!(
        Value::Object(doc.metadata().clone()),
        json!({"title": "Hello", "tags": ["a", "b"]})
    );
    assert_eq!(doc.content(), "<h1>Hi</h1>\n");
}

#[test]
fn test_pattern_divider() {
    let divider = Divider::pattern(r"(?s)\A<!--(?<meta>.*?)-->").unwrap();
    let factory = ContentFactory::new(Aggregator::yaml()).with_divider(divider);

    let doc = factory.process("<!--\ntitle: Hidden\n-->\n\nVisible").unwrap();
    assert_eq!(doc.get("title"), Some(&json!("Hidden")));
    assert_eq!(doc.content(), "<p>Visible</p>\n");
}

#[test]
fn test_later_fences_belong_to_body() {
    let doc = yaml_factory()
        .process("---\na: 1\n---\nintro\n\n---\n\nafter")
        .unwrap();
    assert_eq!(doc.get("a"), Some(&json!(1)));
    assert!(doc.content().contains("<hr />"));
}
