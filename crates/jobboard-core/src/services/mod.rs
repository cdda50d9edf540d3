//! Typed wrappers for each API endpoint.
//!
//! Anonymous reads go through [`PublicClient`](crate::api::PublicClient);
//! everything identity-scoped goes through
//! [`CredentialedClient`](crate::api::CredentialedClient) so the 401/403
//! interceptor sees it.

pub mod applications;
pub mod auth;
pub mod companies;
pub mod jobs;

use jobboard_types::Record;
use serde_json::Value;

/// Reply of endpoints that only confirm an action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ack {
    /// Server supplied message, if any.
    pub message: Option<String>,
    /// Full response body.
    pub body: Value,
}

impl From<Value> for Ack {
    fn from(body: Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self { message, body }
    }
}

/// Pulls the record array stored under `key`. A missing or non-array field
/// yields an empty list.
pub(crate) fn records_at(body: &Value, key: &str) -> Vec<Record> {
    body.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().cloned().map(Record).collect())
        .unwrap_or_default()
}
