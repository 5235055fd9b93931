//! Pure state transition function
//!
//! Given the same state and event this always yields the same result; all
//! I/O is described by the returned effects.

use super::{Effect, Phase, SessionEvent, SessionState};
use crate::transport::ChatRequest;
use thiserror::Error;

/// Assistant turn appended when an exchange fails
pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again later.";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_phase: Phase,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    #[must_use]
    pub fn new(phase: Phase) -> Self {
        Self {
            new_phase: phase,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Events the session refuses
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error("A message is already being sent")]
    Busy,
    #[error("No exchange is in flight")]
    NotAwaiting,
}

/// Compute the next phase and the effects of `event`.
///
/// # Errors
///
/// Returns [`TransitionError::EmptyMessage`] for blank input,
/// [`TransitionError::Busy`] for a submission while one is in flight, and
/// [`TransitionError::NotAwaiting`] for a reply or failure with nothing in flight.
pub fn transition(
    state: &SessionState,
    event: SessionEvent,
) -> Result<TransitionResult, TransitionError> {
    match (state.phase, event) {
        (_, SessionEvent::Submit { text }) if text.trim().is_empty() => {
            Err(TransitionError::EmptyMessage)
        }

        // Single-flight: rejected, not queued
        (Phase::Awaiting, SessionEvent::Submit { .. }) => Err(TransitionError::Busy),

        (Phase::Idle, SessionEvent::Submit { text }) => {
            let message = text.trim().to_string();
            let request = ChatRequest::new(message.clone(), state.thread_id.clone());
            Ok(TransitionResult::new(Phase::Awaiting)
                .with_effect(Effect::append_user(message))
                .with_effect(Effect::ClearError)
                .with_effect(Effect::Notify)
                .with_effect(Effect::SendMessage(request)))
        }

        (Phase::Awaiting, SessionEvent::ReplyReceived { reply }) => {
            Ok(TransitionResult::new(Phase::Idle)
                .with_effect(Effect::append_assistant(reply.message))
                .with_effect(Effect::SetThread(reply.thread_id))
                .with_effect(Effect::Notify))
        }

        (Phase::Awaiting, SessionEvent::ExchangeFailed { error }) => {
            Ok(TransitionResult::new(Phase::Idle)
                .with_effect(Effect::append_assistant(APOLOGY))
                .with_effect(Effect::RecordError(error.user_message()))
                .with_effect(Effect::Notify))
        }

        (
            Phase::Idle,
            SessionEvent::ReplyReceived { .. } | SessionEvent::ExchangeFailed { .. },
        ) => Err(TransitionError::NotAwaiting),
    }
}
