//! Client Error Types
//!
//! Every failure a UI action can hit: the request never got a response, the
//! response could not be decoded, the server refused it, or the form was
//! rejected before any request was made.

use serde_json::Value;
use thiserror::Error;

use super::transport::TransportError;

/// Parsed response body.
///
/// Non-empty bodies are parsed as JSON, falling back to the raw text when
/// they are not JSON (HTML error pages, plain strings).
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Empty,
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return ResponseBody::Empty;
        }
        match serde_json::from_str(text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text.to_string()),
        }
    }

    /// The server's `error` field, else its `detail` field
    pub fn detail(&self) -> Option<String> {
        let ResponseBody::Json(Value::Object(map)) = self else {
            return None;
        };

        ["error", "detail"]
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(|value| match value {
                Value::Null => None,
                Value::String(s) if s.is_empty() => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
    }

    /// Raw payload as JSON text, for diagnostics (`{}` when there is none)
    pub fn raw_text(&self) -> String {
        match self {
            ResponseBody::Empty => "{}".to_string(),
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Text(text) => Value::String(text.clone()).to_string(),
        }
    }

    /// Numeric `id` of a returned record, if the body carries one
    pub fn id(&self) -> Option<u64> {
        match self {
            ResponseBody::Json(value) => value.get("id").and_then(Value::as_u64),
            _ => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            ResponseBody::Empty => Value::Null,
            ResponseBody::Json(value) => value,
            ResponseBody::Text(text) => Value::String(text),
        }
    }
}

/// Errors surfaced by the API client and the form checks in front of it
#[derive(Error, Debug)]
pub enum ClientError {
    /// No response was received
    #[error("Network error: {0}")]
    Network(#[from] TransportError),

    /// A body could not be serialized or decoded into the expected shape
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The server answered with a non-success status
    #[error("API error {status}")]
    Api { status: u16, body: ResponseBody },

    /// Rejected locally before any network call
    #[error("{0}")]
    Validation(String),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided `error`/`detail` message, if any
    pub fn detail(&self) -> Option<String> {
        match self {
            ClientError::Api { body, .. } => body.detail(),
            _ => None,
        }
    }

    /// Raw server payload as text, `{}` for errors without one
    pub fn raw_payload(&self) -> String {
        match self {
            ClientError::Api { body, .. } => body.raw_text(),
            _ => ResponseBody::Empty.raw_text(),
        }
    }

    /// Message for the alert surface: validation text, server detail, or
    /// the given fallback
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(message) => message.clone(),
            other => other.detail().unwrap_or_else(|| fallback.to_string()),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
