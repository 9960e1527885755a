//! Bloom front matter aggregation and document pipelines, umbrella crate.
//!
//! This crate re-exports all Bloom components for convenience.
//! Enable the `yaml-serde` feature for the second YAML backend.

#![doc = include_str!("../README.md")]

pub use bloom_content as content;
pub use bloom_core as core;
pub use bloom_pipeline as pipeline;

pub use bloom_pipeline::{
    Aggregator, ContentChain, ContentFactory, Divider, Document, DocumentContext, MetadataChain,
    ProcessError, TransformChain,
};
