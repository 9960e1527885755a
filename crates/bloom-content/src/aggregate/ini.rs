//! INI front matter.
//!
//! ```ini
//! title = "Release notes"
//! draft = off
//! tags[] = rust
//! tags[] = markdown
//!
//! [author]
//! name = Ada
//! ```
//!
//! Lines are tokenized by `rust-ini`; value interpretation (quotes,
//! comments, booleans, numbers) and the `key[]` / `key[name]` array syntax
//! are handled here according to [`IniMode`].

use ::ini::{Ini, ParseOption};
use bloom_core::{AggregationError, Format, Metadata, Value};
use serde::{Deserialize, Serialize};

/// How INI values are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IniMode {
    /// Unquote, then coerce `true/on/yes`, `false/off/no/none`, `null`,
    /// integers and floats into typed values.
    #[default]
    Typed,
    /// Unquote; booleans become `"1"` / `""`, everything else stays a string.
    Normal,
    /// Keep the value text exactly as written.
    Raw,
}

/// Options for the INI aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IniOptions {
    mode: IniMode,
    sections: bool,
}

impl IniOptions {
    /// Typed values, sections flattened.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value interpretation mode.
    pub fn mode(mut self, mode: IniMode) -> Self {
        self.mode = mode;
        self
    }

    /// Nest each `[section]` as its own mapping instead of flattening.
    pub fn sections(mut self, sections: bool) -> Self {
        self.sections = sections;
        self
    }

    /// Configured mode.
    pub fn get_mode(&self) -> IniMode {
        self.mode
    }

    /// Whether sections are nested.
    pub fn processes_sections(&self) -> bool {
        self.sections
    }
}

pub(super) fn aggregate(block: &str, options: &IniOptions) -> Result<Metadata, AggregationError> {
    let parse_option = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(block, parse_option)
        .map_err(|e| AggregationError::parse(Format::Ini, e))?;

    let mut metadata = Metadata::new();
    for (section, properties) in ini.iter() {
        let target = match section {
            Some(name) if options.sections => section_mapping(&mut metadata, name),
            _ => &mut metadata,
        };
        for (key, raw) in properties.iter() {
            insert(target, key, scalar(raw, options.mode));
        }
    }
    Ok(metadata)
}

fn section_mapping<'m>(metadata: &'m mut Metadata, name: &str) -> &'m mut Metadata {
    let slot = metadata
        .entry(name.to_string())
        .or_insert_with(|| Value::Object(Metadata::new()));
    if !slot.is_object() {
        *slot = Value::Object(Metadata::new());
    }
    match slot {
        Value::Object(map) => map,
        _ => unreachable!("slot was just set to a mapping"),
    }
}

/// Inserts a value, honouring `key[]` (append) and `key[name]` (nested) forms.
fn insert(target: &mut Metadata, key: &str, value: Value) {
    let Some((name, index)) = split_array_key(key) else {
        target.insert(key.to_string(), value);
        return;
    };

    let slot = target.entry(name.to_string()).or_insert(Value::Null);
    if index.is_empty() {
        match slot {
            Value::Array(items) => items.push(value),
            other => *other = Value::Array(vec![value]),
        }
    } else {
        match slot {
            Value::Object(map) => {
                map.insert(index.to_string(), value);
            }
            other => {
                let mut map = Metadata::new();
                map.insert(index.to_string(), value);
                *other = Value::Object(map);
            }
        }
    }
}

fn split_array_key(key: &str) -> Option<(&str, &str)> {
    let inner = key.strip_suffix(']')?;
    let open = inner.find('[')?;
    let name = inner[..open].trim();
    if name.is_empty() {
        return None;
    }
    Some((name, inner[open + 1..].trim()))
}

fn scalar(raw: &str, mode: IniMode) -> Value {
    if mode == IniMode::Raw {
        return Value::String(raw.to_string());
    }
    if let Some(quoted) = unquote(raw) {
        return Value::String(quoted.to_string());
    }

    let text = strip_comment(raw);
    let lowered = text.to_ascii_lowercase();
    match (mode, lowered.as_str()) {
        (IniMode::Typed, "true" | "on" | "yes") => Value::Bool(true),
        (IniMode::Typed, "false" | "off" | "no" | "none") => Value::Bool(false),
        (IniMode::Typed, "null") => Value::Null,
        (IniMode::Typed, _) => number(text).unwrap_or_else(|| Value::String(text.to_string())),
        (_, "true" | "on" | "yes") => Value::String("1".to_string()),
        (_, "false" | "off" | "no" | "none" | "null") => Value::String(String::new()),
        _ => Value::String(text.to_string()),
    }
}

fn unquote(raw: &str) -> Option<&str> {
    let bytes = raw.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(b'"'), Some(b'"')) | (Some(b'\''), Some(b'\'')) if raw.len() >= 2 => {
            Some(&raw[1..raw.len() - 1])
        }
        _ => None,
    }
}

fn strip_comment(raw: &str) -> &str {
    match raw.find(';') {
        Some(pos) => raw[..pos].trim_end(),
        None => raw,
    }
}

/// Integers that fit `i64`, and finite decimal floats. Integers that
/// overflow stay strings.
fn number(text: &str) -> Option<Value> {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    if digits.is_empty() {
        return None;
    }
    if digits.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse::<i64>().ok().map(Value::from);
    }

    let looks_float = digits
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'-' | b'+'))
        && digits.bytes().any(|b| b.is_ascii_digit());
    if !looks_float {
        return None;
    }
    text.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}
