//! Value coercion and unwrapping
//!
//! Raw command-line strings become typed TOML values here, and TOML nodes
//! are unwrapped into plain `serde_json::Value`s for display and querying.
//! The unwrapped form strips all formatting metadata; the on-disk document
//! is never rendered from it.

use serde_json::Value as JsonValue;
use toml_edit::{Array, InlineTable, Item, Table, Value};

use crate::error::{Result, TomlPathError};

/// How a raw input string for `set` is converted before insertion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CoercionMode {
    /// Keep the raw string unchanged.
    #[default]
    String,
    /// Parse as a base-10 integer.
    Int,
    /// Parse as a decimal float.
    Float,
    /// Case-insensitive membership in {"true", "yes", "y", "1"}.
    Bool,
    /// Parse as a JSON array literal.
    JsonArray,
}

impl CoercionMode {
    /// Resolve the CLI coercion flags. The flags are mutually exclusive in
    /// intent; when several are given the first one in this order wins.
    pub fn from_flags(to_int: bool, to_float: bool, to_bool: bool, to_array: bool) -> Self {
        if to_int {
            Self::Int
        } else if to_float {
            Self::Float
        } else if to_bool {
            Self::Bool
        } else if to_array {
            Self::JsonArray
        } else {
            Self::String
        }
    }
}

/// Truthy spellings accepted by [`CoercionMode::Bool`]; anything else is false.
const TRUTHY: [&str; 4] = ["true", "yes", "y", "1"];

/// Coerce a raw string into a TOML value per the requested mode.
pub fn coerce(raw: &str, mode: CoercionMode) -> Result<Value> {
    match mode {
        CoercionMode::String => Ok(Value::from(raw)),
        CoercionMode::Int => raw
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| TomlPathError::invalid_value(raw, "an integer")),
        CoercionMode::Float => raw
            .trim()
            .parse::<f64>()
            .map(Value::from)
            .map_err(|_| TomlPathError::invalid_value(raw, "a float")),
        CoercionMode::Bool => Ok(Value::from(
            TRUTHY.contains(&raw.to_lowercase().as_str()),
        )),
        CoercionMode::JsonArray => {
            let parsed: JsonValue = serde_json::from_str(raw)
                .map_err(|e| TomlPathError::invalid_value(raw, format!("a JSON array ({e})")))?;
            match parsed {
                JsonValue::Array(_) => json_to_toml(&parsed),
                _ => Err(TomlPathError::invalid_value(raw, "a JSON array")),
            }
        }
    }
}

/// Convert a JSON value to a TOML value. TOML has no null, so `null`
/// anywhere in the input is a coercion failure.
pub fn json_to_toml(json: &JsonValue) -> Result<Value> {
    match json {
        JsonValue::Null => Err(TomlPathError::invalid_value(
            "null",
            "a TOML-representable value",
        )),
        JsonValue::Bool(b) => Ok(Value::from(*b)),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::from(f))
            } else {
                Err(TomlPathError::invalid_value(n.to_string(), "a TOML number"))
            }
        }
        JsonValue::String(s) => Ok(Value::from(s.as_str())),
        JsonValue::Array(items) => {
            let mut array = Array::new();
            for item in items {
                array.push(json_to_toml(item)?);
            }
            Ok(Value::Array(array))
        }
        JsonValue::Object(map) => {
            let mut table = InlineTable::new();
            for (key, value) in map {
                table.insert(key.as_str(), json_to_toml(value)?);
            }
            Ok(Value::InlineTable(table))
        }
    }
}

/// Unwrap a TOML item into a plain JSON value, stripping formatting metadata.
pub fn item_to_json(item: &Item) -> JsonValue {
    match item {
        Item::None => JsonValue::Null,
        Item::Value(value) => value_to_json(value),
        Item::Table(table) => table_to_json(table),
        Item::ArrayOfTables(tables) => JsonValue::Array(tables.iter().map(table_to_json).collect()),
    }
}

pub fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::String(s) => JsonValue::String(s.value().clone()),
        Value::Integer(i) => JsonValue::from(*i.value()),
        Value::Float(f) => serde_json::Number::from_f64(*f.value())
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Boolean(b) => JsonValue::Bool(*b.value()),
        Value::Datetime(dt) => JsonValue::String(dt.value().to_string()),
        Value::Array(array) => JsonValue::Array(array.iter().map(value_to_json).collect()),
        Value::InlineTable(table) => {
            let mut map = serde_json::Map::new();
            for (key, value) in table.iter() {
                map.insert(key.to_string(), value_to_json(value));
            }
            JsonValue::Object(map)
        }
    }
}

pub fn table_to_json(table: &Table) -> JsonValue {
    let mut map = serde_json::Map::new();
    for (key, item) in table.iter() {
        map.insert(key.to_string(), item_to_json(item));
    }
    JsonValue::Object(map)
}

/// Render an unwrapped value for output: strings print bare, everything
/// else prints as compact JSON.
pub fn render(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
