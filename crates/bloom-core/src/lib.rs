//! Bloom Core: shared types and errors.
//!
//! This crate provides the types every Bloom crate speaks in. It has no
//! internal Bloom dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: The error taxonomy (aggregation, processing, configuration)
//! - [`metadata`]: Metadata values and the read-only [`MetadataView`]
//! - [`document`]: The final [`Document`] and the [`FromDocument`] wrapper hook

#![forbid(unsafe_code)]

pub mod document;
pub mod error;
pub mod metadata;

// Re-export key types at crate root for convenience
pub use document::{Document, FromDocument};
pub use error::{AggregationError, ConfigError, Format, ImmutableMetadataError, ProcessError};
pub use metadata::{Metadata, MetadataView, Value, value_kind};
