//! Transform chains, DOM contexts and the content factory.
//!
//! This crate covers the second half of the Bloom flow: it runs the
//! metadata and content pipelines over what `bloom-content` extracted and
//! rendered, and assembles the final [`Document`].
//!
//! # Modules
//!
//! - [`chain`]: Persistent, composable [`TransformChain`]s
//! - [`context`]: [`DocumentContext`], the scoped DOM view handed to content steps
//! - [`factory`]: [`ContentFactory`], the orchestrator
//!
//! # Example
//!
//! ```rust
//! use bloom_pipeline::{Aggregator, ContentFactory, MetadataChain};
//! use serde_json::json;
//!
//! let factory = ContentFactory::new(Aggregator::json()).with_metadata_pipelines([
//!     MetadataChain::new().append(|mut meta| {
//!         meta["slug"] = json!("hello-world");
//!         Ok(meta)
//!     }),
//! ]);
//!
//! let doc = factory.process("---\n{\"title\": \"Hello World\"}\n---\nBody").unwrap();
//! assert_eq!(doc.get("slug").unwrap(), "hello-world");
//! assert_eq!(doc.content(), "<p>Body</p>\n");
//! ```

#![forbid(unsafe_code)]

pub mod chain;
pub mod context;
pub mod factory;

// Re-export key types
pub use chain::{Step, TransformChain};
pub use context::{DocumentContext, Element};
pub use factory::{ContentChain, ContentFactory, MetadataChain};

pub use bloom_content::{Aggregator, Divider, MarkdownRenderer, Renderer};
pub use bloom_core::{Document, FromDocument, Metadata, MetadataView, ProcessError, Value};

/// The DOM crate, for callers that work with [`DocumentContext::scope`] nodes.
pub use kuchikiki;
