//! Effects produced by state transitions

use super::state::Turn;
use crate::transport::ChatRequest;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a turn to the transcript
    AppendTurn(Turn),

    /// Remember the thread id for the next request
    SetThread(String),

    /// Clear the previous error
    ClearError,

    /// Record a user-facing error
    RecordError(String),

    /// Send a chat turn through the transport
    SendMessage(ChatRequest),

    /// Tell the presentation layer to re-render
    Notify,
}

impl Effect {
    #[must_use]
    pub fn append_user(content: impl Into<String>) -> Self {
        Effect::AppendTurn(Turn::user(content))
    }

    #[must_use]
    pub fn append_assistant(content: impl Into<String>) -> Self {
        Effect::AppendTurn(Turn::assistant(content))
    }
}
