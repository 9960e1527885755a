//! Scoped DOM query context for content steps.
//!
//! A [`DocumentContext`] pairs a node of a parsed markup tree (its *scope*)
//! with the document's read-only metadata. Content steps receive one, query
//! and mutate the tree through CSS selectors, and hand it back.
//!
//! All contexts of one document share the same tree: a mutation made through
//! any context, including the child contexts created by
//! [`DocumentContext::for_each`], is visible to every other context. Contexts
//! never own the tree; narrowing a context copies two reference-counted
//! handles.
//!
//! Selectors match the scope node itself as well as its descendants, and
//! are evaluated as if the scope were the root of the tree: a combinator
//! never reaches an ancestor outside the scope, so `ul li` does not match a
//! scope that is an `li`.
//!
//! # Example
//!
//! ```rust
//! use bloom_core::MetadataView;
//! use bloom_pipeline::DocumentContext;
//!
//! let ctx = DocumentContext::parse("<p class=\"a\">one</p><p>two</p>", MetadataView::default()).unwrap();
//! assert_eq!(ctx.add_class("p", "lead").unwrap(), 2);
//! assert_eq!(ctx.inner_html(), "<p class=\"a lead\">one</p><p class=\"lead\">two</p>");
//! ```

use bloom_core::{ImmutableMetadataError, MetadataView, ProcessError, Value};
use kuchikiki::traits::*;
use kuchikiki::{ElementData, NodeData, NodeDataRef, NodeRef, Selectors};

/// Handle to an element matched by a selector.
pub type Element = NodeDataRef<ElementData>;

const CLASS: &str = "class";

/// A scope node within a shared markup tree, plus read-only metadata.
#[derive(Clone)]
pub struct DocumentContext {
    metadata: MetadataView,
    scope: NodeRef,
    document: NodeRef,
}

impl DocumentContext {
    /// Parses `markup` as an HTML document and scopes a context to its
    /// `body` element.
    pub fn parse(markup: &str, metadata: MetadataView) -> Result<Self, ProcessError> {
        let document = kuchikiki::parse_html().one(markup);
        let body = document
            .select_first("body")
            .map_err(|()| ProcessError::invalid_content("parsed markup has no body element"))?;
        let scope = body.as_node().clone();
        reclaim_leading_nodes(&document, &scope);
        Ok(Self {
            metadata,
            scope,
            document,
        })
    }

    /// Creates a context scoped to `scope` within `document`.
    pub fn new(metadata: MetadataView, scope: NodeRef, document: NodeRef) -> Self {
        Self {
            metadata,
            scope,
            document,
        }
    }

    /// A context over the same tree and metadata, narrowed to `scope`.
    pub fn narrow(&self, scope: NodeRef) -> Self {
        Self {
            metadata: self.metadata.clone(),
            scope,
            document: self.document.clone(),
        }
    }

    // ========================================================================
    // Tree access
    // ========================================================================

    /// The node this context is scoped to.
    pub fn scope(&self) -> &NodeRef {
        &self.scope
    }

    /// The document node of the tree.
    pub fn document(&self) -> &NodeRef {
        &self.document
    }

    /// Elements matching `selector` under the scope (the scope included),
    /// in document order.
    ///
    /// The result is a snapshot: later mutations do not change which
    /// elements it holds.
    pub fn query(&self, selector: &str) -> Result<Vec<Element>, ProcessError> {
        let selectors = compile(selector)?;
        let matches = self.scoped_matches(&selectors);
        log::trace!("selector '{}' matched {} element(s)", selector, matches.len());
        Ok(matches)
    }

    /// First element matching `selector`, if any.
    pub fn select_first(&self, selector: &str) -> Result<Option<Element>, ProcessError> {
        let selectors = compile(selector)?;
        Ok(self.scoped_matches(&selectors).into_iter().next())
    }

    /// Matches `selectors` against a detached copy of the scope subtree and
    /// maps the hits back onto the shared tree. The copy mirrors the subtree
    /// node for node, so both walks stay in step.
    fn scoped_matches(&self, selectors: &Selectors) -> Vec<Element> {
        let detached = detached_copy(&self.scope);
        self.scope
            .inclusive_descendants()
            .zip(detached.inclusive_descendants())
            .filter_map(|(original, copy)| {
                let copy = copy.into_element_ref()?;
                if selectors.matches(&copy) {
                    original.into_element_ref()
                } else {
                    None
                }
            })
            .collect()
    }

    /// Runs `step` once per matching element with a context scoped to it.
    ///
    /// Matches are collected before the first call, so steps may freely
    /// mutate the tree. Returns the number of matches visited; the first
    /// failing step aborts the iteration.
    pub fn for_each<F>(&self, selector: &str, mut step: F) -> Result<usize, ProcessError>
    where
        F: FnMut(DocumentContext) -> Result<(), ProcessError>,
    {
        let matches = self.query(selector)?;
        for element in &matches {
            step(self.narrow(element.as_node().clone()))?;
        }
        Ok(matches.len())
    }

    /// Outer HTML of the scope node.
    pub fn html(&self) -> String {
        self.scope.to_string()
    }

    /// Serialized children of the scope node.
    pub fn inner_html(&self) -> String {
        self.scope.children().map(|child| child.to_string()).collect()
    }

    // ========================================================================
    // Class helpers
    // ========================================================================

    /// Replaces the class attribute of every match with `classes`, joined
    /// by spaces. An empty list removes the attribute.
    ///
    /// Returns the number of elements touched.
    pub fn set_classes<I, S>(&self, selector: &str, classes: I) -> Result<usize, ProcessError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = classes
            .into_iter()
            .map(|class| class.as_ref().trim().to_string())
            .filter(|class| !class.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let matches = self.query(selector)?;
        for element in &matches {
            let mut attributes = element.attributes.borrow_mut();
            if joined.is_empty() {
                attributes.remove(CLASS);
            } else {
                attributes.insert(CLASS, joined.clone());
            }
        }
        Ok(matches.len())
    }

    /// Appends `class` to every match. A missing attribute counts as an
    /// empty list; a class already present is not repeated.
    pub fn add_class(&self, selector: &str, class: &str) -> Result<usize, ProcessError> {
        let class = class.trim();
        let matches = self.query(selector)?;
        if class.is_empty() {
            return Ok(matches.len());
        }

        for element in &matches {
            let mut attributes = element.attributes.borrow_mut();
            let mut list = class_list(attributes.get(CLASS));
            if !list.iter().any(|existing| existing == class) {
                list.push(class.to_string());
            }
            attributes.insert(CLASS, list.join(" "));
        }
        Ok(matches.len())
    }

    /// Removes `class` from every match, dropping the attribute when no
    /// classes remain.
    pub fn remove_class(&self, selector: &str, class: &str) -> Result<usize, ProcessError> {
        let class = class.trim();
        let matches = self.query(selector)?;
        for element in &matches {
            let mut attributes = element.attributes.borrow_mut();
            let list: Vec<String> = class_list(attributes.get(CLASS))
                .into_iter()
                .filter(|existing| existing != class)
                .collect();
            if list.is_empty() {
                attributes.remove(CLASS);
            } else {
                attributes.insert(CLASS, list.join(" "));
            }
        }
        Ok(matches.len())
    }

    // ========================================================================
    // Metadata
    // ========================================================================

    /// Read-only metadata of the document.
    pub fn metadata(&self) -> &MetadataView {
        &self.metadata
    }

    /// Looks up a metadata value.
    pub fn get(&self, key: &str) -> Result<&Value, ProcessError> {
        self.metadata.get(key).ok_or_else(|| ProcessError::UnknownKey {
            key: key.to_string(),
        })
    }

    /// Whether the metadata has `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.metadata.contains_key(key)
    }

    /// Metadata cannot be modified from the content stage; always fails.
    pub fn set(&self, key: &str, _value: Value) -> Result<(), ImmutableMetadataError> {
        Err(ImmutableMetadataError {
            key: key.to_string(),
        })
    }

    /// Metadata cannot be modified from the content stage; always fails.
    pub fn remove(&self, key: &str) -> Result<(), ImmutableMetadataError> {
        Err(ImmutableMetadataError {
            key: key.to_string(),
        })
    }
}

impl std::fmt::Debug for DocumentContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scope = self
            .scope
            .as_element()
            .map(|element| element.name.local.to_string())
            .unwrap_or_else(|| "#node".to_string());
        f.debug_struct("DocumentContext")
            .field("scope", &scope)
            .field("metadata", &self.metadata)
            .finish()
    }
}

fn compile(selector: &str) -> Result<Selectors, ProcessError> {
    Selectors::compile(selector).map_err(|()| ProcessError::UnsupportedSelector {
        selector: selector.to_string(),
    })
}

/// Copies `node` and its subtree into a new, parentless tree. Only what
/// selector matching can observe is kept: elements with their attributes,
/// text, and the document node. Other nodes become empty comments so the
/// copy keeps the same shape.
fn detached_copy(node: &NodeRef) -> NodeRef {
    let copy = match node.data() {
        NodeData::Element(element) => NodeRef::new_element(
            element.name.clone(),
            element.attributes.borrow().map.clone(),
        ),
        NodeData::Text(text) => NodeRef::new_text(text.borrow().clone()),
        NodeData::Document(_) => NodeRef::new_document(),
        _ => NodeRef::new_comment(String::new()),
    };
    for child in node.children() {
        copy.append(detached_copy(&child));
    }
    copy
}

/// The HTML parser moves leading comments and head-eligible elements
/// (`<style>`, `<script>`, `<link>`, `<meta>`, `<title>`) out of `body`.
/// Puts them back in front of the body content, in source order.
fn reclaim_leading_nodes(document: &NodeRef, body: &NodeRef) {
    let mut leading: Vec<NodeRef> = document
        .children()
        .filter(|node| node.as_comment().is_some())
        .collect();
    if let Ok(head) = document.select_first("head") {
        leading.extend(head.as_node().children());
    }
    if leading.is_empty() {
        return;
    }

    log::trace!("moving {} leading node(s) into body", leading.len());
    let anchor = body.first_child();
    for node in leading {
        match &anchor {
            Some(anchor) => anchor.insert_before(node),
            None => body.append(node),
        }
    }
}

fn class_list(attribute: Option<&str>) -> Vec<String> {
    attribute
        .unwrap_or_default()
        .split_ascii_whitespace()
        .map(str::to_string)
        .collect()
}
