//! Metadata aggregation.
//!
//! An [`Aggregator`] turns the raw front matter block into a [`Metadata`]
//! mapping. Each variant carries the options for its format; dispatch is a
//! plain `match`, so every format fails through the same
//! [`AggregationError`] taxonomy.
//!
//! | Variant | Empty block | Non-mapping result |
//! |---------|-------------|--------------------|
//! | `None`  | empty mapping (block ignored) | n/a |
//! | `Ini`   | empty mapping | n/a |
//! | `Json`  | `ParseFailure` | `InvalidTopLevelShape` |
//! | `Yaml`  | empty mapping | `InvalidTopLevelShape` |
//! | `Toml`  | empty mapping | n/a |
//!
//! # Example
//!
//! ```rust
//! use bloom_content::{Aggregator, IniMode, IniOptions};
//!
//! let aggregator = Aggregator::Ini(IniOptions::new().mode(IniMode::Typed));
//! let metadata = aggregator.aggregate("draft = yes\nweight = 3").unwrap();
//!
//! assert_eq!(metadata["draft"], true);
//! assert_eq!(metadata["weight"], 3);
//! ```

mod ini;
mod json;
mod toml;
mod yaml;

pub use self::ini::{IniMode, IniOptions};
pub use self::json::JsonOptions;
pub use self::yaml::{YamlBackend, YamlOptions};

use bloom_core::{AggregationError, Format, Metadata, Value, value_kind};

use crate::frontmatter::{Divider, split};

/// Front matter aggregation strategy, one variant per format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Aggregator {
    /// No structured front matter: metadata is always empty and the input
    /// is not split.
    #[default]
    None,
    /// INI front matter.
    Ini(IniOptions),
    /// JSON front matter.
    Json(JsonOptions),
    /// YAML front matter.
    Yaml(YamlOptions),
    /// TOML front matter.
    Toml,
}

impl Aggregator {
    /// INI aggregator with default options (typed values, no sections).
    pub fn ini() -> Self {
        Aggregator::Ini(IniOptions::default())
    }

    /// JSON aggregator with default options.
    pub fn json() -> Self {
        Aggregator::Json(JsonOptions::default())
    }

    /// YAML aggregator using the default backend.
    pub fn yaml() -> Self {
        Aggregator::Yaml(YamlOptions::default())
    }

    /// TOML aggregator.
    pub fn toml() -> Self {
        Aggregator::Toml
    }

    /// Format this aggregator parses.
    pub fn format(&self) -> Format {
        match self {
            Aggregator::None => Format::None,
            Aggregator::Ini(_) => Format::Ini,
            Aggregator::Json(_) => Format::Json,
            Aggregator::Yaml(_) => Format::Yaml,
            Aggregator::Toml => Format::Toml,
        }
    }

    /// Parses a metadata block into a mapping.
    pub fn aggregate(&self, block: &str) -> Result<Metadata, AggregationError> {
        log::debug!("aggregating {} bytes of {} front matter", block.len(), self.format());

        match self {
            Aggregator::None => Ok(Metadata::new()),
            Aggregator::Ini(options) => ini::aggregate(block, options),
            Aggregator::Json(options) => json::aggregate(block, options),
            Aggregator::Yaml(options) => yaml::aggregate(block, options),
            Aggregator::Toml => toml::aggregate(block),
        }
    }

    /// Splits `input` and aggregates its front matter.
    ///
    /// Returns the metadata and the body to render. Input without front
    /// matter yields an empty mapping and the whole input as body, for every
    /// format. The `None` aggregator never splits.
    pub fn extract<'a>(
        &self,
        input: &'a str,
        divider: &Divider,
    ) -> Result<(Metadata, &'a str), AggregationError> {
        if matches!(self, Aggregator::None) {
            return Ok((Metadata::new(), input));
        }

        let raw = split(input, divider);
        match raw.meta {
            Some(block) => Ok((self.aggregate(block)?, raw.body)),
            None => Ok((Metadata::new(), raw.body)),
        }
    }
}

/// Requires a decoded value to be a mapping.
fn into_mapping(format: Format, value: Value) -> Result<Metadata, AggregationError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(AggregationError::InvalidTopLevelShape {
            format,
            found: value_kind(&other),
        }),
    }
}
