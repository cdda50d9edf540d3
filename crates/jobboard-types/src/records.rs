//! Opaque server records.
//!
//! The client never interprets job, company or application documents beyond
//! reading an id or a display field, so they stay as raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON document returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Value);

pub type Job = Record;
pub type Company = Record;
pub type Application = Record;

impl Record {
    /// Returns the document id (`_id`, falling back to `id`).
    pub fn id(&self) -> Option<&str> {
        self.str_field("_id").or_else(|| self.str_field("id"))
    }

    /// Returns a top-level string field.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Returns the id of an embedded document, e.g. the job of an application.
    ///
    /// Handles both populated (`{"job": {"_id": ..}}`) and unpopulated
    /// (`{"job": "<id>"}`) references.
    pub fn nested_id(&self, key: &str) -> Option<&str> {
        match self.0.get(key)? {
            Value::String(id) => Some(id.as_str()),
            Value::Object(map) => map
                .get("_id")
                .or_else(|| map.get("id"))
                .and_then(Value::as_str),
            _ => None,
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
