//! Front matter splitting.
//!
//! Front matter is a metadata block at the very start of a document,
//! delimited by a fence line (`---` by default):
//!
//! ```markdown
//! ---
//! title: My Document
//! tags: [rust, markdown]
//! ---
//!
//! # Document Content
//! ```
//!
//! Splitting never fails: input without a fence at offset zero, or with an
//! opening fence but no closing one, has no front matter and the whole input
//! is the body.
//!
//! # Usage
//!
//! ```rust
//! use bloom_content::frontmatter::{split, Divider};
//!
//! let raw = split("---\na: 1\n---\nbody", &Divider::default());
//! assert_eq!(raw.meta, Some("a: 1"));
//! assert_eq!(raw.body, "body");
//! ```

use bloom_core::ConfigError;
use regex::Regex;

/// The default fence line.
pub const DEFAULT_FENCE: &str = "---";

/// Name of the capture group a pattern divider must define.
pub const META_GROUP: &str = "meta";

/// How the metadata block is delimited.
#[derive(Debug, Clone)]
pub enum Divider {
    /// A line consisting of exactly this text opens and closes the block.
    Fence(String),
    /// A regex matched at offset zero; its `meta` group is the block and the
    /// whole match is removed from the input.
    Pattern(Regex),
}

impl Default for Divider {
    fn default() -> Self {
        Divider::Fence(DEFAULT_FENCE.to_string())
    }
}

impl Divider {
    /// Creates a fence divider, e.g. `+++` for TOML front matter.
    pub fn fence(fence: impl Into<String>) -> Result<Self, ConfigError> {
        let fence = fence.into();
        let trimmed = fence.trim();
        if trimmed.is_empty() || trimmed.contains('\n') {
            return Err(ConfigError::new(format!(
                "divider fence must be a single non-empty line, got {fence:?}"
            )));
        }
        Ok(Divider::Fence(trimmed.to_string()))
    }

    /// Creates a regex divider. The pattern must define a `meta` group.
    ///
    /// ```rust
    /// use bloom_content::frontmatter::{split, Divider};
    ///
    /// let divider = Divider::pattern(r"<!--(?<meta>[\s\S]*?)-->\n").unwrap();
    /// let raw = split("<!--\ntitle = \"x\"\n-->\nText", &divider);
    /// assert_eq!(raw.meta, Some("title = \"x\""));
    /// assert_eq!(raw.body, "Text");
    /// ```
    pub fn pattern(pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern)
            .map_err(|e| ConfigError::new(format!("invalid divider pattern: {e}")))?;

        if !regex.capture_names().any(|name| name == Some(META_GROUP)) {
            return Err(ConfigError::new(format!(
                "divider pattern must define a `(?<{META_GROUP}>...)` group"
            )));
        }
        Ok(Divider::Pattern(regex))
    }
}

/// Raw front matter and body, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSplit<'a> {
    /// Trimmed text between the fences, `None` when there is no front matter.
    pub meta: Option<&'a str>,
    /// Everything after the closing fence, leading blank lines removed.
    pub body: &'a str,
}

impl<'a> RawSplit<'a> {
    fn without_front_matter(input: &'a str) -> Self {
        Self {
            meta: None,
            body: input,
        }
    }

    /// Whether a metadata block was found.
    pub fn has_front_matter(&self) -> bool {
        self.meta.is_some()
    }
}

/// Splits `input` into its metadata block and body.
///
/// With a fence divider the first line must be the fence; the block ends at
/// the first later line that is the fence again. Fence-like lines after that
/// belong to the body.
pub fn split<'a>(input: &'a str, divider: &Divider) -> RawSplit<'a> {
    match divider {
        Divider::Fence(fence) => split_fenced(input, fence),
        Divider::Pattern(regex) => split_pattern(input, regex),
    }
}

fn split_fenced<'a>(input: &'a str, fence: &str) -> RawSplit<'a> {
    let mut lines = input.split_inclusive('\n');

    // Opening fence must be the first line and be terminated
    match lines.next() {
        Some(first) if first.ends_with('\n') && is_fence(first, fence) => {}
        _ => return RawSplit::without_front_matter(input),
    }

    let meta_start = input.find('\n').map_or(input.len(), |pos| pos + 1);
    let mut offset = meta_start;

    for line in lines {
        if is_fence(line, fence) {
            let meta = input[meta_start..offset].trim();
            let body = &input[offset + line.len()..];
            log::debug!("front matter found ({} bytes)", meta.len());
            return RawSplit {
                meta: Some(meta),
                body: strip_leading_blank_lines(body),
            };
        }
        offset += line.len();
    }

    log::warn!("Front matter opening fence found but no closing fence");
    RawSplit::without_front_matter(input)
}

fn split_pattern<'a>(input: &'a str, regex: &Regex) -> RawSplit<'a> {
    let Some(captures) = regex.captures(input) else {
        return RawSplit::without_front_matter(input);
    };

    match (captures.get(0), captures.name(META_GROUP)) {
        (Some(whole), Some(meta)) if whole.start() == 0 => RawSplit {
            meta: Some(meta.as_str().trim()),
            body: strip_leading_blank_lines(&input[whole.end()..]),
        },
        _ => RawSplit::without_front_matter(input),
    }
}

fn is_fence(line: &str, fence: &str) -> bool {
    line.trim_end() == fence
}

/// Removes leading lines that contain only whitespace.
///
/// Indentation of the first non-blank line is kept, so indented code
/// blocks survive.
pub fn strip_leading_blank_lines(text: &str) -> &str {
    let mut rest = text;
    while let Some(pos) = rest.find('\n') {
        if !rest[..pos].trim().is_empty() {
            return rest;
        }
        rest = &rest[pos + 1..];
    }
    if rest.trim().is_empty() { "" } else { rest }
}

// ============================================================================
// Tests
// ============================================================================
