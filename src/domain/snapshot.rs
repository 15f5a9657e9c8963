//! Parsed twemproxy stats document.
//!
//! The proxy answers every connection on its stats port with a single JSON
//! object: a handful of keys describing the proxy itself, followed by one
//! entry per configured pool. Key order follows the document.

use crate::domain::errors::SnapshotError;
use serde_json::{Map, Value};

/// Top-level keys that describe the snapshot rather than a pool
pub const ROOT_METADATA_KEYS: [&str; 5] = ["service", "source", "version", "uptime", "timestamp"];

#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    root: Map<String, Value>,
}

impl StatsSnapshot {
    /// Parses raw bytes read from the stats port
    pub fn parse(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, SnapshotError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(SnapshotError::NotAnObject {
                kind: value_kind(&other),
            }),
        }
    }

    pub fn is_metadata_key(key: &str) -> bool {
        ROOT_METADATA_KEYS.contains(&key)
    }

    /// Non-metadata entries, in document order
    pub fn pools(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.root
            .iter()
            .filter(|(key, _)| !Self::is_metadata_key(key))
            .map(|(key, value)| (key.as_str(), value))
    }
}

/// Short name of a JSON value's variant, for error messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
