//! Failure paths surfaced by `ContentFactory::process`.

use bloom_core::{AggregationError, Format};
use bloom_pipeline::{Aggregator, ContentChain, ContentFactory, ProcessError};

use crate::common::yaml_factory;

#[test]
fn test_malformed_yaml_is_aggregation_failure() {
    let err = yaml_factory()
        .process("---\ntitle: [unclosed\n---\nBody")
        .unwrap_err();

    assert!(matches!(
        err,
        ProcessError::MetadataAggregationFailed(AggregationError::ParseFailure {
            format: Format::Yaml,
            ..
        })
    ));
}

#[test]
fn test_empty_json_block_fails() {
    let err = ContentFactory::new(Aggregator::json())
        .process("---\n---\nBody")
        .unwrap_err();
    assert!(matches!(err, ProcessError::MetadataAggregationFailed(_)));
}

#[test]
fn test_json_array_is_invalid_shape() {
    let err = ContentFactory::new(Aggregator::json())
        .process("---\n[1, 2]\n---\nBody")
        .unwrap_err();
    assert!(matches!(
        err,
        ProcessError::MetadataAggregationFailed(AggregationError::InvalidTopLevelShape { .. })
    ));
}

#[test]
fn test_unknown_metadata_key() {
    let chain = ContentChain::new().append(|ctx| {
        ctx.get("missing")?;
        Ok(ctx)
    });
    let err = yaml_factory()
        .with_content_pipelines([chain])
        .process("text")
        .unwrap_err();
    assert!(matches!(err, ProcessError::UnknownKey { ref key } if key == "missing"));
}

#[test]
fn test_unsupported_selector() {
    let chain = ContentChain::new().append(|ctx| {
        ctx.add_class("p:::nope", "x")?;
        Ok(ctx)
    });
    let err = yaml_factory()
        .with_content_pipelines([chain])
        .process("text")
        .unwrap_err();
    assert!(matches!(err, ProcessError::UnsupportedSelector { ref selector } if selector == "p:::nope"));
}

#[test]
fn test_non_root_result_is_rejected() {
    let chain = ContentChain::new().append(|ctx| {
        let p = ctx
            .select_first("p")?
            .ok_or_else(|| ProcessError::step("expected a paragraph"))?;
        Ok(ctx.narrow(p.as_node().clone()))
    });
    let err = yaml_factory()
        .with_content_pipelines([chain])
        .process("text")
        .unwrap_err();
    assert!(matches!(err, ProcessError::ContentPipelineInvalidResult { .. }));
}

#[cfg(not(feature = "yaml-serde"))]
#[test]
fn test_unavailable_yaml_backend() {
    use bloom_content::{YamlBackend, YamlOptions};

    let factory = ContentFactory::new(Aggregator::Yaml(
        YamlOptions::new().backend(YamlBackend::YamlSerde),
    ));
    let err = factory.process("---\na: 1\n---\nx").unwrap_err();
    assert!(matches!(
        err,
        ProcessError::MetadataAggregationFailed(AggregationError::BackendUnavailable { .. })
    ));
}
