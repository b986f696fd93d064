//! Typed values for the free-form metadata attached to a document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Open metadata bag attached to a [`DocumentRecord`](crate::DocumentRecord).
pub type Metadata = BTreeMap<String, MetadataValue>;

/// A single metadata value.
///
/// Serialized without a tag, so a bag reads and writes as a plain JSON object.
/// Numbers keep their exact textual form across a load/save cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// JSON `null`
    Null,
    /// Boolean flag
    Bool(bool),
    /// Integer or floating point number
    Number(serde_json::Number),
    /// Text
    String(String),
    /// Ordered list of values
    List(Vec<MetadataValue>),
    /// Nested mapping
    Map(BTreeMap<String, MetadataValue>),
}

impl MetadataValue {
    /// Returns the string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this is `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, MetadataValue::Null)
    }

    /// Parses a command-line style value.
    ///
    /// Anything that parses as JSON keeps its JSON type; everything else is
    /// taken as a plain string, so `2023` becomes a number and `KU` a string.
    pub fn parse_lenient(raw: &str) -> Self {
        serde_json::from_str::<serde_json::Value>(raw)
            .map(MetadataValue::from)
            .unwrap_or_else(|_| MetadataValue::String(raw.to_string()))
    }
}

impl From<serde_json::Value> for MetadataValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => MetadataValue::Null,
            serde_json::Value::Bool(b) => MetadataValue::Bool(b),
            serde_json::Value::Number(n) => MetadataValue::Number(n),
            serde_json::Value::String(s) => MetadataValue::String(s),
            serde_json::Value::Array(items) => {
                MetadataValue::List(items.into_iter().map(MetadataValue::from).collect())
            }
            serde_json::Value::Object(map) => MetadataValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, MetadataValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        MetadataValue::String(s.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        MetadataValue::String(s)
    }
}

impl From<bool> for MetadataValue {
    fn from(b: bool) -> Self {
        MetadataValue::Bool(b)
    }
}

impl From<i64> for MetadataValue {
    fn from(n: i64) -> Self {
        MetadataValue::Number(n.into())
    }
}
