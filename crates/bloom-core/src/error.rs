//! Error types for Bloom.
//!
//! The taxonomy follows the processing stages:
//!
//! - [`AggregationError`]: the front matter block could not become a mapping
//! - [`ImmutableMetadataError`]: a content step tried to write metadata
//! - [`ProcessError`]: anything that aborts `ContentFactory::process`
//! - [`ConfigError`]: invalid configuration detected at construction time

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Boxed error used as the cause of parse and step failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Front matter serialization formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// No structured front matter.
    #[default]
    None,
    /// INI key/value pairs with optional sections.
    Ini,
    /// A JSON object.
    Json,
    /// A YAML mapping.
    Yaml,
    /// A TOML table.
    Toml,
}

impl Format {
    /// Lowercase name of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::None => "none",
            Format::Ini => "ini",
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Format::None),
            "ini" => Ok(Format::Ini),
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            other => Err(ConfigError::new(format!("unknown front matter format '{other}'"))),
        }
    }
}

// ============================================================================
// Aggregation
// ============================================================================

/// Failure to turn a front matter block into a metadata mapping.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AggregationError {
    /// The backend rejected the block.
    #[error("Failed to parse {format} front matter: {reason}")]
    ParseFailure {
        /// Format being parsed
        format: Format,
        /// Human-readable reason
        reason: String,
        /// Diagnostic from the underlying parser
        #[source]
        source: Option<BoxError>,
    },

    /// The selected backend is not compiled into this build.
    #[error("{format} backend '{backend}' is not available in this build")]
    BackendUnavailable {
        /// Format being parsed
        format: Format,
        /// Name of the missing backend
        backend: &'static str,
    },

    /// The block decoded, but not to a mapping.
    #[error("{format} front matter must be a mapping, found {found}")]
    InvalidTopLevelShape {
        /// Format being parsed
        format: Format,
        /// Kind of value that was decoded instead
        found: &'static str,
    },
}

impl AggregationError {
    /// Creates a parse failure carrying the parser's diagnostic.
    pub fn parse<E>(format: Format, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        AggregationError::ParseFailure {
            format,
            reason: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a parse failure with only a message.
    pub fn parse_message<S: Into<String>>(format: Format, reason: S) -> Self {
        AggregationError::ParseFailure {
            format,
            reason: reason.into(),
            source: None,
        }
    }

    /// Format the failing aggregator was configured for.
    pub fn format(&self) -> Format {
        match self {
            AggregationError::ParseFailure { format, .. }
            | AggregationError::BackendUnavailable { format, .. }
            | AggregationError::InvalidTopLevelShape { format, .. } => *format,
        }
    }
}

// ============================================================================
// Metadata immutability
// ============================================================================

/// Attempted write to metadata from inside the content pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("metadata is read-only in the content pipeline (attempted to modify '{key}')")]
pub struct ImmutableMetadataError {
    /// Key the caller tried to write or delete.
    pub key: String,
}

// ============================================================================
// Processing
// ============================================================================

/// Errors that abort processing of a document.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ProcessError {
    /// The front matter could not be aggregated.
    #[error("Metadata aggregation failed: {0}")]
    MetadataAggregationFailed(#[from] AggregationError),

    /// The metadata pipeline produced something other than a mapping.
    #[error("The metadata pipeline must produce a mapping, found {found}")]
    MetadataPipelineInvalidResult {
        /// Kind of value the pipeline returned
        found: &'static str,
    },

    /// The content pipeline did not hand back the document root.
    #[error("The content pipeline must return a context scoped to the document root: {reason}")]
    ContentPipelineInvalidResult {
        /// What was wrong with the returned context
        reason: String,
    },

    /// A CSS selector could not be compiled.
    #[error("Unsupported selector: {selector}")]
    UnsupportedSelector {
        /// The selector text as given
        selector: String,
    },

    /// A metadata key looked up through a document context does not exist.
    #[error("Unknown metadata key: {key}")]
    UnknownKey {
        /// The missing key
        key: String,
    },

    /// A content step tried to modify metadata.
    #[error(transparent)]
    ImmutableMetadata(#[from] ImmutableMetadataError),

    /// Reading an input file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Error raised by a user-supplied pipeline step.
    #[error("Pipeline step failed: {0}")]
    Step(#[source] BoxError),
}

impl ProcessError {
    /// Wraps an arbitrary step error.
    pub fn step<E>(source: E) -> Self
    where
        E: Into<BoxError>,
    {
        ProcessError::Step(source.into())
    }

    /// Creates an I/O error tagged with the offending path.
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        ProcessError::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid content pipeline result error.
    pub fn invalid_content<S: Into<String>>(reason: S) -> Self {
        ProcessError::ContentPipelineInvalidResult {
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Invalid configuration, reported when a component is constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Configuration error: {message}")]
pub struct ConfigError {
    /// What is wrong with the configuration
    pub message: String,
}

impl ConfigError {
    /// Creates a configuration error.
    pub fn new<S: Into<String>>(message: S) -> Self {
        ConfigError {
            message: message.into(),
        }
    }
}
