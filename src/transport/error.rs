//! Transport error types

use thiserror::Error;

/// Transport error with classification
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
    /// HTTP status for `Server` errors
    pub status: Option<u16>,
    /// Human-readable text the server put in its error body, if any
    pub server_message: Option<String>,
}

impl TransportError {
    #[must_use]
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            server_message: None,
        }
    }

    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Network, message)
    }

    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }

    #[must_use]
    pub fn server(status: u16, server_message: Option<String>) -> Self {
        let message = match &server_message {
            Some(text) => format!("Server error ({status}): {text}"),
            None => format!("Server error ({status})"),
        };
        Self {
            kind: TransportErrorKind::Server,
            message,
            status: Some(status),
            server_message,
        }
    }

    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::MalformedResponse, message)
    }

    /// Text suitable for showing to the customer
    #[must_use]
    pub fn user_message(&self) -> String {
        if let Some(text) = &self.server_message {
            return text.clone();
        }
        let fallback = match self.kind {
            TransportErrorKind::Network => {
                "Unable to reach customer support. Please check your connection and try again."
            }
            TransportErrorKind::Timeout => {
                "Customer support took too long to respond. Please try again."
            }
            TransportErrorKind::Server | TransportErrorKind::MalformedResponse => {
                "Customer support is unavailable right now. Please try again later."
            }
        };
        fallback.to_string()
    }
}

/// Error classification for retry logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connection could not be established or was lost - retryable
    Network,
    /// Attempt exceeded the configured timeout - retryable
    Timeout,
    /// Remote returned a non-2xx status - not retryable
    Server,
    /// 2xx but the body lacked a message or thread id - not retryable
    MalformedResponse,
}

impl TransportErrorKind {
    #[must_use]
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Network | Self::Timeout)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Server => "server",
            Self::MalformedResponse => "malformed_response",
        }
    }
}
