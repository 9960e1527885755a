//! CLI configuration.
//!
//! Loaded from a TOML file (`bloom.toml` in the working directory unless
//! `--config` names another one). Every field has a default, so a partial
//! file, or no file at all, is valid.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bloom_content::{
    Aggregator, Divider, IniMode, IniOptions, JsonOptions, YamlBackend, YamlOptions,
};
use bloom_core::{ConfigError, Format};
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "bloom.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomConfig {
    /// Front matter parsing.
    pub front_matter: FrontMatterConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

/// `[front_matter]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatterConfig {
    /// Front matter format.
    pub format: Format,
    /// Literal fence line.
    pub divider: String,
    /// Regex divider with a `meta` group; takes precedence over `divider`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// INI options.
    pub ini: IniConfig,
    /// JSON options.
    pub json: JsonConfig,
    /// YAML options.
    pub yaml: YamlConfig,
}

impl Default for FrontMatterConfig {
    fn default() -> Self {
        Self {
            format: Format::Yaml,
            divider: bloom_content::frontmatter::DEFAULT_FENCE.to_string(),
            pattern: None,
            ini: IniConfig::default(),
            json: JsonConfig::default(),
            yaml: YamlConfig::default(),
        }
    }
}

/// `[front_matter.ini]` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IniConfig {
    /// Value interpretation mode.
    pub mode: IniMode,
    /// Nest sections instead of flattening them.
    pub sections: bool,
}

/// `[front_matter.json]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    /// Maximum nesting depth.
    pub max_depth: usize,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            max_depth: JsonOptions::default().get_max_depth(),
        }
    }
}

/// `[front_matter.yaml]` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YamlConfig {
    /// Decoding backend.
    pub backend: YamlBackend,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset (e.g. `warn`, `bloom=debug`).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl BloomConfig {
    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, `bloom.toml` in the working
    /// directory is used when present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(&default)
                } else {
                    log::debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Reads and parses a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes the configuration as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl FrontMatterConfig {
    /// Aggregator for the configured format and options.
    pub fn aggregator(&self) -> Aggregator {
        match self.format {
            Format::None => Aggregator::None,
            Format::Ini => Aggregator::Ini(
                IniOptions::new()
                    .mode(self.ini.mode)
                    .sections(self.ini.sections),
            ),
            Format::Json => Aggregator::Json(JsonOptions::new().max_depth(self.json.max_depth)),
            Format::Yaml => Aggregator::Yaml(YamlOptions::new().backend(self.yaml.backend)),
            Format::Toml => Aggregator::Toml,
        }
    }

    /// Divider for the configured pattern or fence.
    pub fn divider(&self) -> Result<Divider, ConfigError> {
        match &self.pattern {
            Some(pattern) => Divider::pattern(pattern),
            None => Divider::fence(self.divider.as_str()),
        }
    }
}
