//! Forgiving field deserializers for model-generated records.
//!
//! Every helper first reads the field as an untyped [`serde_json::Value`],
//! so they work with any self-describing format (JSON from the model,
//! TOML from the catalog).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Truthiness the way the browser client judged it: `null`, `false`, `0`,
/// `NaN` and `""` are falsy, everything else is truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        _ => true,
    }
}

/// Reads an optional group, treating a value of the wrong shape as absent.
///
/// # Errors
///
/// Only fails if the underlying deserializer itself fails.
pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Reads a string list, treating anything else as an empty list.
///
/// # Errors
///
/// Only fails if the underlying deserializer itself fails.
pub fn list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_list(deserializer)?.unwrap_or_default())
}

/// Reads an optional string list. Numbers are kept as text; other
/// non-string elements are skipped.
///
/// # Errors
///
/// Only fails if the underlying deserializer itself fails.
pub fn optional_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(items.into_iter().filter_map(scalar_text).collect()),
        _ => None,
    })
}

/// Reads a text field that the model sometimes emits as a number.
///
/// # Errors
///
/// Only fails if the underlying deserializer itself fails.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_text))
}

/// Like [`text`], with absent values read as an empty string.
///
/// # Errors
///
/// Only fails if the underlying deserializer itself fails.
pub fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?.unwrap_or_default())
}

/// Reads a required label (name, city). Any value is accepted; strings
/// are kept as-is and everything else is rendered as JSON text.
///
/// # Errors
///
/// Fails if the field is missing.
pub fn label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Reads a number, accepting numeric strings. Anything else is absent.
///
/// # Errors
///
/// Only fails if the underlying deserializer itself fails.
pub fn number<'de, D>(deserializer: D) -> Result<Option<Number>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => Some(n),
        Some(Value::String(s)) => serde_json::from_str::<Number>(s.trim()).ok(),
        _ => None,
    })
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
