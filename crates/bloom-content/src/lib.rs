//! Front matter splitting, metadata aggregation and markdown rendering.
//!
//! This crate covers the first half of the Bloom flow: raw text in,
//! `(metadata, markup)` out.
//!
//! # Modules
//!
//! - [`frontmatter`]: Divider-based splitting into a metadata block and a body
//! - [`aggregate`]: Format-specific parsing of the metadata block
//! - [`render`]: Markdown to HTML rendering
//!
//! # Example
//!
//! ```rust
//! use bloom_content::{Aggregator, Divider, MarkdownRenderer, Renderer};
//!
//! let input = "---\ntitle: Hello\n---\n# Hi";
//! let (metadata, body) = Aggregator::yaml().extract(input, &Divider::default()).unwrap();
//!
//! assert_eq!(metadata["title"], "Hello");
//! assert_eq!(MarkdownRenderer::new().render(body), "<h1>Hi</h1>\n");
//! ```

#![forbid(unsafe_code)]

pub mod aggregate;
pub mod frontmatter;
pub mod render;

// Re-export key types and functions
pub use aggregate::{Aggregator, IniMode, IniOptions, JsonOptions, YamlBackend, YamlOptions};
pub use frontmatter::{Divider, RawSplit, split, strip_leading_blank_lines};
pub use render::{MarkdownRenderer, Renderer};

pub use bloom_core::{AggregationError, Format, Metadata, Value};
