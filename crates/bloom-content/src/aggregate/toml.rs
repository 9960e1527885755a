//! TOML front matter. Datetimes are kept as their RFC 3339 text.

use bloom_core::{AggregationError, Format, Metadata, Value};

pub(super) fn aggregate(block: &str) -> Result<Metadata, AggregationError> {
    let table: ::toml::Table =
        ::toml::from_str(block).map_err(|e| AggregationError::parse(Format::Toml, e))?;
    Ok(convert_table(table))
}

fn convert_table(table: ::toml::Table) -> Metadata {
    table
        .into_iter()
        .map(|(key, value)| (key, convert(value)))
        .collect()
}

fn convert(value: ::toml::Value) -> Value {
    match value {
        ::toml::Value::String(s) => Value::String(s),
        ::toml::Value::Integer(i) => Value::from(i),
        // NaN and infinities have no JSON representation
        ::toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ::toml::Value::Boolean(b) => Value::Bool(b),
        ::toml::Value::Datetime(d) => Value::String(d.to_string()),
        ::toml::Value::Array(items) => Value::Array(items.into_iter().map(convert).collect()),
        ::toml::Value::Table(table) => Value::Object(convert_table(table)),
    }
}
