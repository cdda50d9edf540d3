//! Structured API errors.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categories of API failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// Timeout, DNS or connection failure. No partial result.
    Network,
    /// 401 or 403: the session is missing or expired.
    AuthRejected,
    /// Other 4xx, usually carrying a message for the user.
    Validation,
    /// 5xx or any unexpected status.
    Server,
    /// Successful status with a body that did not decode.
    Parse,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Network => write!(f, "network"),
            ApiErrorKind::AuthRejected => write!(f, "auth_rejected"),
            ApiErrorKind::Validation => write!(f, "validation"),
            ApiErrorKind::Server => write!(f, "server"),
            ApiErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Error returned by every API call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// HTTP status when a response was received.
    pub status: Option<u16>,
    /// One-line summary suitable for display.
    pub message: String,
    /// Raw response body or transport error detail.
    pub details: Option<String>,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
            details: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Parse, message)
    }

    /// Builds an error from a non-success response.
    ///
    /// The message is the server's `message` field when the body is JSON that
    /// carries one, otherwise `HTTP <status>`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let kind = match status {
            401 | 403 => ApiErrorKind::AuthRejected,
            400..=499 => ApiErrorKind::Validation,
            _ => ApiErrorKind::Server,
        };

        let server_message = serde_json::from_str::<Value>(body).ok().and_then(|json| {
            json.get("message")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|msg| !msg.is_empty())
                .map(str::to_string)
        });

        Self {
            kind,
            status: Some(status),
            message: server_message.unwrap_or_else(|| format!("HTTP {status}")),
            details: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    pub fn is_auth_rejected(&self) -> bool {
        self.kind == ApiErrorKind::AuthRejected
    }

    /// Returns the message to show the user, preferring what the server said.
    ///
    /// Transport and decoding failures fall back to `default`, as do
    /// responses that carried no message of their own.
    pub fn user_message<'a>(&'a self, default: &'a str) -> &'a str {
        match self.status {
            Some(status) if self.message != format!("HTTP {status}") => &self.message,
            _ => default,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self {
                details: Some(err.to_string()),
                ..Self::parse("Failed to decode response")
            };
        }
        let message = if err.is_timeout() {
            "Request timed out"
        } else if err.is_connect() {
            "Could not reach the server"
        } else {
            "Network request failed"
        };
        Self {
            details: Some(err.to_string()),
            ..Self::network(message)
        }
    }
}
