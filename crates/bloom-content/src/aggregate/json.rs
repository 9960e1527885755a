//! JSON front matter.
//!
//! The block must be a single JSON object. Integers outside the `i64` /
//! `u64` range are decoded as strings so no digits are lost.

use bloom_core::{AggregationError, Format, Metadata, Value};

use super::into_mapping;

/// Deepest nesting `serde_json` decodes; its recursion guard rejects the
/// 128th nested container.
pub const MAX_SUPPORTED_DEPTH: usize = 127;

/// Default maximum nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = MAX_SUPPORTED_DEPTH;

/// Options for the JSON aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonOptions {
    max_depth: usize,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl JsonOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum nesting depth; the top-level object counts as depth 1.
    ///
    /// Capped at 127, the deepest nesting `serde_json` decodes.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        if max_depth > MAX_SUPPORTED_DEPTH {
            log::warn!(
                "JSON max_depth {max_depth} exceeds the supported {MAX_SUPPORTED_DEPTH}, capping"
            );
        }
        self.max_depth = max_depth.min(MAX_SUPPORTED_DEPTH);
        self
    }

    /// Configured maximum depth.
    pub fn get_max_depth(&self) -> usize {
        self.max_depth
    }
}

pub(super) fn aggregate(block: &str, options: &JsonOptions) -> Result<Metadata, AggregationError> {
    let value: Value =
        serde_json::from_str(block).map_err(|e| AggregationError::parse(Format::Json, e))?;

    let depth = depth(&value);
    if depth > options.max_depth {
        return Err(AggregationError::parse_message(
            Format::Json,
            format!("maximum nesting depth {} exceeded ({depth})", options.max_depth),
        ));
    }

    into_mapping(Format::Json, big_integers_as_strings(value))
}

fn depth(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(depth).max().unwrap_or(0),
        Value::Object(map) => 1 + map.values().map(depth).max().unwrap_or(0),
        _ => 0,
    }
}

fn big_integers_as_strings(value: Value) -> Value {
    match value {
        Value::Number(number) if is_big_integer(&number) => Value::String(number.to_string()),
        Value::Array(items) => {
            Value::Array(items.into_iter().map(big_integers_as_strings).collect())
        }
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, big_integers_as_strings(value)))
                .collect(),
        ),
        other => other,
    }
}

/// An integer literal that fits neither `i64` nor `u64`.
fn is_big_integer(number: &serde_json::Number) -> bool {
    if number.is_i64() || number.is_u64() {
        return false;
    }
    let text = number.to_string();
    let digits = text.strip_prefix('-').unwrap_or(&text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
