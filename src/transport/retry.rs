//! One-shot retry for transient transport failures
//!
//! Per call: `Idle -> First -> {Success | retryable -> Retry -> {Success | Failure}
//! | non-retryable -> Failure}`. The attempt lives on the stack of a single
//! `send`, so nothing carries over between unrelated submissions.

use super::{ChatReply, ChatRequest, ChatTransport, TransportError};
use async_trait::async_trait;

/// Physical attempt within one logical send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    First,
    Retry,
}

impl Attempt {
    /// 1-based attempt number, for logs
    #[must_use]
    pub fn number(self) -> u32 {
        match self {
            Self::First => 1,
            Self::Retry => 2,
        }
    }

    /// The attempt to make after `error`, or `None` when the failure is terminal
    #[must_use]
    pub fn after_failure(self, error: &TransportError) -> Option<Self> {
        match self {
            Self::First if error.kind.is_retryable() => Some(Self::Retry),
            Self::First | Self::Retry => None,
        }
    }
}

/// Wraps a transport with at most one automatic retry
pub struct RetryingTransport<T> {
    inner: T,
}

impl<T: ChatTransport> RetryingTransport<T> {
    #[must_use]
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    #[must_use]
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: ChatTransport> ChatTransport for RetryingTransport<T> {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        let mut attempt = Attempt::First;
        loop {
            match self.inner.send(request).await {
                Ok(reply) => return Ok(reply),
                Err(error) => match attempt.after_failure(&error) {
                    Some(next) => {
                        tracing::warn!(
                            endpoint = %self.inner.endpoint(),
                            kind = error.kind.as_str(),
                            error = %error,
                            "Chat request failed, retrying once"
                        );
                        attempt = next;
                    }
                    None => {
                        tracing::debug!(
                            attempt = attempt.number(),
                            kind = error.kind.as_str(),
                            "Chat request failed terminally"
                        );
                        return Err(error);
                    }
                },
            }
        }
    }

    fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}
