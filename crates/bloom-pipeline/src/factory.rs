//! The content factory: raw text in, [`Document`] out.
//!
//! Processing runs in a fixed order:
//!
//! 1. split the input with the configured [`Divider`]
//! 2. aggregate the front matter with the configured [`Aggregator`]
//! 3. render the body
//! 4. run the metadata chain, if any (the result must still be a mapping)
//! 5. run the content chain, if any, over a [`DocumentContext`] scoped to the
//!    `body` of the rendered markup, then serialize the body's children
//!
//! Without chains the factory never builds a DOM.
//!
//! # Example
//!
//! ```rust
//! use bloom_pipeline::{Aggregator, ContentChain, ContentFactory};
//!
//! let factory = ContentFactory::new(Aggregator::yaml()).with_content_pipelines([
//!     ContentChain::new().append(|ctx| {
//!         ctx.add_class("h1", "title")?;
//!         Ok(ctx)
//!     }),
//! ]);
//!
//! let doc = factory.process("---\ntitle: Hello\n---\n# Hi").unwrap();
//! assert_eq!(doc.get("title").unwrap(), "Hello");
//! assert_eq!(doc.content(), "<h1 class=\"title\">Hi</h1>");
//! ```

use std::path::Path;
use std::sync::Arc;

use bloom_content::{Aggregator, Divider, MarkdownRenderer, Renderer};
use bloom_core::{Document, FromDocument, Metadata, MetadataView, ProcessError, Value, value_kind};
use kuchikiki::NodeRef;

use crate::chain::TransformChain;
use crate::context::DocumentContext;

/// Chain over the metadata mapping (seeded as a [`Value::Object`]).
pub type MetadataChain = TransformChain<Value>;

/// Chain over the document context of the rendered markup.
pub type ContentChain = TransformChain<DocumentContext>;

/// Long-lived document processor holding configuration and two chains.
#[derive(Clone)]
pub struct ContentFactory {
    aggregator: Aggregator,
    divider: Divider,
    renderer: Arc<dyn Renderer>,
    metadata_chain: Option<MetadataChain>,
    content_chain: Option<ContentChain>,
}

impl Default for ContentFactory {
    fn default() -> Self {
        Self::new(Aggregator::None)
    }
}

impl ContentFactory {
    /// Creates a factory for `aggregator` with the default divider and the
    /// markdown renderer.
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            aggregator,
            divider: Divider::default(),
            renderer: Arc::new(MarkdownRenderer::new()),
            metadata_chain: None,
            content_chain: None,
        }
    }

    /// Sets the front matter divider.
    pub fn with_divider(mut self, divider: Divider) -> Self {
        self.divider = divider;
        self
    }

    /// Replaces the body renderer.
    pub fn with_renderer<R: Renderer + 'static>(mut self, renderer: R) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    /// Adds chains to the metadata pipeline. The first chain is adopted
    /// when none is configured yet; the rest are concatenated in order.
    pub fn with_metadata_pipelines<I>(mut self, chains: I) -> Self
    where
        I: IntoIterator<Item = MetadataChain>,
    {
        self.metadata_chain = merge(self.metadata_chain, chains);
        self
    }

    /// Adds chains to the content pipeline, like
    /// [`with_metadata_pipelines`](Self::with_metadata_pipelines).
    pub fn with_content_pipelines<I>(mut self, chains: I) -> Self
    where
        I: IntoIterator<Item = ContentChain>,
    {
        self.content_chain = merge(self.content_chain, chains);
        self
    }

    /// The configured aggregator.
    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// The configured divider.
    pub fn divider(&self) -> &Divider {
        &self.divider
    }

    // ========================================================================
    // Processing
    // ========================================================================

    /// Processes one document.
    ///
    /// Without a content chain the content is the renderer output verbatim,
    /// usually ending in `\n`; with one it is the serialized body children
    /// joined by `\n`, with no trailing newline.
    pub fn process(&self, input: &str) -> Result<Document, ProcessError> {
        let (metadata, body) = self.aggregator.extract(input, &self.divider)?;
        log::debug!(
            "extracted {} metadata key(s), {} byte body",
            metadata.len(),
            body.len()
        );
        let markup = self.renderer.render(body);

        if self.metadata_chain.is_none() && self.content_chain.is_none() {
            return Ok(Document::new(metadata, markup));
        }

        let metadata = match &self.metadata_chain {
            Some(chain) => run_metadata_chain(chain, metadata)?,
            None => metadata,
        };

        let content = match &self.content_chain {
            Some(chain) => run_content_chain(chain, &metadata, &markup)?,
            None => markup,
        };

        Ok(Document::new(metadata, content))
    }

    /// Reads a UTF-8 file and processes it.
    pub fn process_file(&self, path: impl AsRef<Path>) -> Result<Document, ProcessError> {
        let path = path.as_ref();
        let meta = std::fs::metadata(path).map_err(|e| ProcessError::io(path, e))?;
        if !meta.is_file() {
            return Err(ProcessError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            ));
        }

        log::debug!("processing {}", path.display());
        let input = std::fs::read_to_string(path).map_err(|e| ProcessError::io(path, e))?;
        self.process(&input)
    }

    /// Processes one document into a caller-chosen wrapper type.
    pub fn process_into<D: FromDocument>(&self, input: &str) -> Result<D, ProcessError> {
        self.process(input).map(Document::into_document)
    }

    /// Processes a file into a caller-chosen wrapper type.
    pub fn process_file_into<D: FromDocument>(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<D, ProcessError> {
        self.process_file(path).map(Document::into_document)
    }
}

impl std::fmt::Debug for ContentFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentFactory")
            .field("aggregator", &self.aggregator)
            .field("divider", &self.divider)
            .field("metadata_chain", &self.metadata_chain)
            .field("content_chain", &self.content_chain)
            .finish_non_exhaustive()
    }
}

fn merge<T, I>(current: Option<TransformChain<T>>, chains: I) -> Option<TransformChain<T>>
where
    I: IntoIterator<Item = TransformChain<T>>,
{
    chains.into_iter().fold(current, |merged, chain| match merged {
        Some(existing) => Some(existing.concat(chain)),
        None => Some(chain),
    })
}

fn run_metadata_chain(chain: &MetadataChain, metadata: Metadata) -> Result<Metadata, ProcessError> {
    match chain.apply(Value::Object(metadata))? {
        Value::Object(map) => Ok(map),
        other => Err(ProcessError::MetadataPipelineInvalidResult {
            found: value_kind(&other),
        }),
    }
}

fn run_content_chain(
    chain: &ContentChain,
    metadata: &Metadata,
    markup: &str,
) -> Result<String, ProcessError> {
    let root = DocumentContext::parse(markup, MetadataView::new(metadata.clone()))?;
    let body = root.scope().clone();

    let result = chain.apply(root)?;
    if result.scope() != &body {
        return Err(ProcessError::invalid_content(
            "the returned context is not scoped to the body element",
        ));
    }
    if body.parent().is_none() {
        return Err(ProcessError::invalid_content(
            "the body element was detached from the document",
        ));
    }

    Ok(serialize_children(&body))
}

/// Serializes each child of `body` on its own line. Whitespace-only text
/// between blocks is dropped.
fn serialize_children(body: &NodeRef) -> String {
    let parts: Vec<String> = body
        .children()
        .filter(|child| {
            child
                .as_text()
                .is_none_or(|text| !text.borrow().trim().is_empty())
        })
        .map(|child| child.to_string())
        .collect();
    parts.join("\n").trim_start_matches('\n').to_string()
}
