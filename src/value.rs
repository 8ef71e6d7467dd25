//! Typed Form Values
//!
//! Hosts feed the engine loosely shaped UI state: text inputs, numbers,
//! checkboxes, file pickers, repeated groups. `FieldValue` gives those a
//! single typed representation so rules can pattern-match instead of
//! guessing, with a bridge from `serde_json::Value` for JSON-shaped
//! payloads.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A full form snapshot, keyed by field name.
pub type FormData = HashMap<String, FieldValue>;

/// Metadata for a picked file. The engine never reads file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type as reported by the picker, e.g. `image/png`.
    pub mime: String,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, size: u64, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime: mime.into(),
        }
    }
}

/// One field's current value.
///
/// `Null` stands in for both "field absent from the form data" and an
/// explicit null from the host. Serialization is untagged, so a JSON form
/// payload maps onto this without wrapper objects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    File(FileMeta),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// True when `required` should reject the value: null, text that is
    /// empty after trimming, or an empty list. `0`, `false`, and files all
    /// count as present.
    pub fn is_absent(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// True for null or the empty string. Content rules (email, dates,
    /// lengths) pass blank values through untouched; emptiness belongs to
    /// `required` alone.
    pub fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Null) || matches!(self, FieldValue::Text(text) if text.is_empty())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileMeta> {
        match self {
            FieldValue::File(meta) => Some(meta),
            _ => None,
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

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Number(n.into())
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Number(n.into())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<FileMeta> for FieldValue {
    fn from(meta: FileMeta) -> Self {
        FieldValue::File(meta)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(items: Vec<FieldValue>) -> Self {
        FieldValue::List(items)
    }
}

impl<T> From<Option<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

impl From<serde_json::Value> for FieldValue {
    /// Maps a JSON value onto the engine's value model.
    ///
    /// Objects are treated as file metadata when they carry the `name`,
    /// `size`, and `mime` keys; any other object becomes `Null` since the
    /// engine has no nested-form concept.
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::Number(n) => FieldValue::Number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(text) => FieldValue::Text(text),
            serde_json::Value::Array(items) => {
                FieldValue::List(items.into_iter().map(FieldValue::from).collect())
            }
            serde_json::Value::Object(_) => serde_json::from_value::<FileMeta>(value)
                .map(FieldValue::File)
                .unwrap_or(FieldValue::Null),
        }
    }
}

/// Converts a JSON object into `FormData`, one entry per key.
/// Non-object values produce an empty form.
pub fn form_from_json(value: serde_json::Value) -> FormData {
    match value {
        serde_json::Value::Object(entries) => entries
            .into_iter()
            .map(|(name, value)| (name, FieldValue::from(value)))
            .collect(),
        _ => FormData::new(),
    }
}
