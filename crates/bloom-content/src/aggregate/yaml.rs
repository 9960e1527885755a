//! YAML front matter.
//!
//! Two interchangeable backends decode the block. Both must produce a
//! mapping; an empty block (or an explicit `null` document) counts as an
//! empty mapping.

use bloom_core::{AggregationError, Format, Metadata, Value};
use serde::{Deserialize, Serialize};

use super::into_mapping;

/// YAML decoding backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum YamlBackend {
    /// `serde_yaml`, always available.
    #[default]
    SerdeYaml,
    /// `yaml_serde`, available with the `yaml-serde` feature.
    YamlSerde,
}

impl YamlBackend {
    /// Backend name as used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            YamlBackend::SerdeYaml => "serde-yaml",
            YamlBackend::YamlSerde => "yaml-serde",
        }
    }

    /// Whether the backend is compiled into this build.
    pub fn is_available(&self) -> bool {
        match self {
            YamlBackend::SerdeYaml => true,
            YamlBackend::YamlSerde => cfg!(feature = "yaml-serde"),
        }
    }
}

/// Options for the YAML aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct YamlOptions {
    backend: YamlBackend,
}

impl YamlOptions {
    /// Default backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the decoding backend.
    pub fn backend(mut self, backend: YamlBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Configured backend.
    pub fn get_backend(&self) -> YamlBackend {
        self.backend
    }
}

pub(super) fn aggregate(block: &str, options: &YamlOptions) -> Result<Metadata, AggregationError> {
    if block.trim().is_empty() {
        return Ok(Metadata::new());
    }

    let value = match options.backend {
        YamlBackend::SerdeYaml => serde_yaml::from_str::<Value>(block)
            .map_err(|e| AggregationError::parse(Format::Yaml, e))?,
        YamlBackend::YamlSerde => decode_yaml_serde(block)?,
    };

    match value {
        Value::Null => Ok(Metadata::new()),
        other => into_mapping(Format::Yaml, other),
    }
}

#[cfg(feature = "yaml-serde")]
fn decode_yaml_serde(block: &str) -> Result<Value, AggregationError> {
    yaml_serde_backend::from_str::<Value>(block).map_err(|e| AggregationError::parse(Format::Yaml, e))
}

#[cfg(not(feature = "yaml-serde"))]
fn decode_yaml_serde(_block: &str) -> Result<Value, AggregationError> {
    Err(AggregationError::BackendUnavailable {
        format: Format::Yaml,
        backend: YamlBackend::YamlSerde.as_str(),
    })
}
