//! Handlers for `bloom config` subcommands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};

use crate::cli::ConfigAction;
use crate::config::{BloomConfig, DEFAULT_CONFIG_FILE};

// ============================================================================
// Command dispatch
// ============================================================================

/// Runs a config subcommand and returns what should be printed.
pub fn handle_config_command(config_path: Option<&Path>, action: ConfigAction) -> Result<String> {
    match action {
        ConfigAction::Show => cmd_config_show(config_path),
        ConfigAction::Path => Ok(cmd_config_path(config_path)),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key),
        ConfigAction::Init { file, force } => {
            let target = file.as_deref().or(config_path);
            cmd_config_init(target, force)
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Effective configuration as TOML.
pub fn cmd_config_show(config_path: Option<&Path>) -> Result<String> {
    BloomConfig::load(config_path)?.to_toml_string()
}

/// Path of the configuration file in use, noting when it does not exist.
pub fn cmd_config_path(config_path: Option<&Path>) -> String {
    let path = resolve_config_path(config_path);
    if path.is_file() {
        path.display().to_string()
    } else {
        format!(
            "{} (file does not exist, run `bloom config init` to create it)",
            path.display()
        )
    }
}

/// A single configuration value by dotted key.
pub fn cmd_config_get(config_path: Option<&Path>, key: &str) -> Result<String> {
    let config = BloomConfig::load(config_path)?;
    let value = toml::Value::try_from(&config)?;
    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| anyhow!("Key '{key}' not found in configuration"))
}

/// Writes the default configuration, refusing to overwrite unless forced.
pub fn cmd_config_init(file: Option<&Path>, force: bool) -> Result<String> {
    let path = resolve_config_path(file);

    if path.exists() && !force {
        bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let toml_str = BloomConfig::default().to_toml_string()?;
    std::fs::write(&path, toml_str)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    log::info!("wrote default configuration to {}", path.display());
    Ok(format!("Config file created at {}", path.display()))
}

fn resolve_config_path(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

// ============================================================================
// TOML helpers
// ============================================================================

/// Navigates a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Formats a TOML value for stdout: scalars bare, tables as TOML.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("bloom.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    // ------------------------------------------------------------------------
    // show / get
    // ------------------------------------------------------------------------

    #[test]
    fn test_show_reflects_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[front_matter]\nformat = \"toml\"\ndivider = \"+++\"\n");

        let shown = cmd_config_show(Some(path.as_path())).unwrap();
        assert!(shown.contains("format = \"toml\""));
        assert!(shown.contains("divider = \"+++\""));
    }

    #[test]
    fn test_get_scalar_and_table() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[front_matter.json]\nmax_depth = 16\n");

        assert_eq!(cmd_config_get(Some(path.as_path()), "front_matter.json.max_depth").unwrap(), "16");
        assert_eq!(cmd_config_get(Some(path.as_path()), "front_matter.format").unwrap(), "yaml");
        assert!(
            cmd_config_get(Some(path.as_path()), "front_matter.ini")
                .unwrap()
                .contains("mode = \"typed\"")
        );
    }

    #[test]
    fn test_get_unknown_key() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");
        let err = cmd_config_get(Some(path.as_path()), "front_matter.nope").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    // ------------------------------------------------------------------------
    // init / path
    // ------------------------------------------------------------------------

    #[test]
    fn test_init_writes_defaults_and_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("bloom.toml");

        let message = cmd_config_init(Some(path.as_path()), false).unwrap();
        assert!(message.contains("Config file created"));
        assert_eq!(BloomConfig::load(Some(path.as_path())).unwrap(), BloomConfig::default());

        let err = cmd_config_init(Some(path.as_path()), false).unwrap_err();
        assert!(err.to_string().contains("--force"));

        assert!(cmd_config_init(Some(path.as_path()), true).is_ok());
    }

    #[test]
    fn test_path_notes_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(cmd_config_path(Some(missing.as_path())).contains("does not exist"));

        let present = write_config(&dir, "");
        assert_eq!(cmd_config_path(Some(present.as_path())), present.display().to_string());
    }

    // ------------------------------------------------------------------------
    // helpers
    // ------------------------------------------------------------------------

    #[test]
    fn test_get_nested_value() {
        let value = toml::Value::Table(toml::from_str("[a.b]\nc = 1\n").unwrap());
        assert_eq!(
            get_nested_value(&value, "a.b.c"),
            Some(&toml::Value::Integer(1))
        );
        assert!(get_nested_value(&value, "a.x").is_none());
        assert!(get_nested_value(&value, "a.b.c.d").is_none());
    }

    #[test]
    fn test_format_toml_value() {
        assert_eq!(format_toml_value(&toml::Value::Boolean(true)), "true");
        assert_eq!(format_toml_value(&toml::Value::String("x".into())), "x");
    }
}
