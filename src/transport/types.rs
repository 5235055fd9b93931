//! Wire types for the chat endpoint

use super::TransportError;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    /// Serialized as `null` before the first exchange
    pub thread_id: Option<String>,
}

impl ChatRequest {
    #[must_use]
    pub fn new(message: impl Into<String>, thread_id: Option<String>) -> Self {
        Self {
            message: message.into(),
            thread_id,
        }
    }
}

/// A validated assistant turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub message: String,
    pub thread_id: String,
}

impl ChatReply {
    #[must_use]
    pub fn new(message: impl Into<String>, thread_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            thread_id: thread_id.into(),
        }
    }
}

/// Success body as received; every field is optional until validated
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireReply {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    thread_id: Option<String>,
}

impl WireReply {
    /// Enforce the success contract: a non-blank message and a thread id
    pub(crate) fn validate(self) -> Result<ChatReply, TransportError> {
        let message = self
            .message
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| TransportError::malformed("Response is missing the assistant message"))?;
        let thread_id = self
            .thread_id
            .filter(|t| !t.is_empty())
            .ok_or_else(|| TransportError::malformed("Response is missing the thread id"))?;
        Ok(ChatReply { message, thread_id })
    }
}

/// Error body of a non-2xx response
#[derive(Debug, Deserialize)]
pub(crate) struct WireError {
    #[serde(default)]
    message: Option<String>,
}

impl WireError {
    /// Extract the server-provided text from a raw body, if it has any
    pub(crate) fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<WireError>(body)
            .ok()
            .and_then(|e| e.message)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}
