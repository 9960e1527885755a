//! Markdown rendering.
//!
//! The [`Renderer`] trait is the seam between the document pipeline and the
//! markup generator; [`MarkdownRenderer`] is the `pulldown-cmark` backed
//! implementation used by default.
//!
//! # Example
//!
//! ```rust
//! use bloom_content::render::{MarkdownRenderer, Renderer};
//!
//! let html = MarkdownRenderer::new().render("Some ~~old~~ text");
//! assert_eq!(html, "<p>Some <del>old</del> text</p>\n");
//! ```

use pulldown_cmark::{Options, Parser, html};

/// Turns a document body into markup.
///
/// Rendering is infallible for UTF-8 input.
pub trait Renderer: Send + Sync {
    /// Renders `body` to HTML.
    fn render(&self, body: &str) -> String;
}

/// Markdown renderer with the common extensions enabled: tables,
/// footnotes, strikethrough, task lists and `{#id .class}` heading
/// attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Renderer with the default extension set.
    pub fn new() -> Self {
        Self {
            options: Self::default_options(),
        }
    }

    /// Renderer with an explicit `pulldown-cmark` option set.
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }

    /// The extension set used by [`MarkdownRenderer::new`].
    pub fn default_options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
    }

    /// Options in effect.
    pub fn options(&self) -> Options {
        self.options
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, body: &str) -> String {
        let parser = Parser::new_ext(body, self.options);
        let mut out = String::with_capacity(body.len() * 3 / 2);
        html::push_html(&mut out, parser);
        log::debug!("rendered {} bytes of markdown into {} bytes", body.len(), out.len());
        out
    }
}

impl<R: Renderer + ?Sized> Renderer for std::sync::Arc<R> {
    fn render(&self, body: &str) -> String {
        (**self).render(body)
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&self, body: &str) -> String {
        (**self).render(body)
    }
}
