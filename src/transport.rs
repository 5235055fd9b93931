//! Chat transport abstraction
//!
//! A `ChatTransport` makes exactly one physical attempt. Retry and logging
//! are layered on as wrappers.

mod error;
mod http;
mod retry;
mod types;

pub use error::{TransportError, TransportErrorKind};
pub use http::HttpTransport;
pub use retry::{Attempt, RetryingTransport};
pub use types::{ChatReply, ChatRequest};

use async_trait::async_trait;
use std::sync::Arc;

/// Sends one chat turn to the remote service
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Make a single attempt
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] classified by [`TransportErrorKind`].
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError>;

    /// Where requests go, for logs
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for Arc<T> {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        (**self).send(request).await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

/// Logging wrapper for chat transports
pub struct LoggingTransport<T> {
    inner: T,
}

impl<T: ChatTransport> LoggingTransport<T> {
    #[must_use]
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<T: ChatTransport> ChatTransport for LoggingTransport<T> {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        let start = std::time::Instant::now();
        let result = self.inner.send(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    new_thread = request.thread_id.is_none(),
                    thread_id = %reply.thread_id,
                    "Chat request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    kind = e.kind.as_str(),
                    status = ?e.status,
                    error = %e.message,
                    retryable = e.kind.is_retryable(),
                    "Chat request failed"
                );
            }
        }

        result
    }

    fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}
