//! Events that can occur in a session

use crate::transport::{ChatReply, TransportError};

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// User pressed send
    Submit { text: String },
    /// The service answered (after any retry)
    ReplyReceived { reply: ChatReply },
    /// Every allowed attempt failed
    ExchangeFailed { error: TransportError },
}

impl SessionEvent {
    #[must_use]
    pub fn submit(text: impl Into<String>) -> Self {
        Self::Submit { text: text.into() }
    }
}
