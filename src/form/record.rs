//! Field values and record conversion.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{OutreachError, Result};

/// Error-map key for failures that belong to the whole submission.
pub const SUBMIT_ERROR_KEY: &str = "submit";

/// Field name to value.
pub type FormRecord = BTreeMap<String, FieldValue>;

/// Field name to human-readable error.
pub type FieldErrorMap = BTreeMap<String, String>;

/// Value of a single form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            FieldValue::Text(_) => None,
        }
    }

    /// Empty or whitespace-only text, or an empty list.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }

    fn from_json(field: &str, value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(FieldValue::Text(s)),
            Value::Null => Ok(FieldValue::Text(String::new())),
            Value::Bool(b) => Ok(FieldValue::Text(b.to_string())),
            Value::Number(n) => Ok(FieldValue::Text(n.to_string())),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(OutreachError::Form(format!(
                        "field '{}' holds a non-text list item: {}",
                        field, other
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(FieldValue::List),
            Value::Object(_) => Err(OutreachError::Form(format!("field '{}' is a nested object", field))),
        }
    }

    fn into_json(self) -> Value {
        match self {
            FieldValue::Text(text) => Value::String(text),
            FieldValue::List(items) => Value::Array(items.into_iter().map(Value::String).collect()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::List(items.into_iter().map(str::to_string).collect())
    }
}

/// Split multi-line text into entries: one per line, trimmed, blanks dropped.
pub fn split_list_field(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build a record from `(name, value)` pairs.
pub fn record_from<I, K, V>(pairs: I) -> FormRecord
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<FieldValue>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// Flatten a serializable struct into a record.
pub fn record_from_model<M: Serialize>(model: &M) -> Result<FormRecord> {
    match serde_json::to_value(model)? {
        Value::Object(map) => map
            .into_iter()
            .map(|(name, value)| {
                let field = FieldValue::from_json(&name, value)?;
                Ok((name, field))
            })
            .collect(),
        other => Err(OutreachError::Form(format!("expected a struct-like model, got {}", other))),
    }
}

/// Rebuild a typed model from a record.
pub fn model_from_record<M: DeserializeOwned>(record: &FormRecord) -> Result<M> {
    let map: serde_json::Map<String, Value> = record
        .iter()
        .map(|(name, value)| (name.clone(), value.clone().into_json()))
        .collect();
    Ok(serde_json::from_value(Value::Object(map))?)
}
