//! Conversation session
//!
//! Holds the transcript and thread id, gates submissions so at most one
//! exchange is in flight, and publishes a snapshot after every change.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::SessionEvent;
pub use state::{Phase, Role, SessionState, Transcript, Turn};
pub use transition::{transition, TransitionError, TransitionResult, APOLOGY};

use crate::transport::{ChatRequest, ChatTransport, RetryingTransport, TransportErrorKind};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// How a call to [`ChatSession::submit`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was appended and nothing was sent
    Ignored(TransitionError),
    /// An assistant reply was appended
    Answered,
    /// The apology turn was appended after the exchange failed
    Failed(TransportErrorKind),
}

/// One customer's conversation with support
pub struct ChatSession<T> {
    state: Mutex<SessionState>,
    transport: RetryingTransport<T>,
    updates: watch::Sender<SessionState>,
}

impl<T: ChatTransport> ChatSession<T> {
    /// Start an empty session; `transport` gets one automatic retry per submission
    #[must_use]
    pub fn new(transport: T) -> Self {
        let (updates, _) = watch::channel(SessionState::default());
        Self {
            state: Mutex::new(SessionState::default()),
            transport: RetryingTransport::new(transport),
            updates,
        }
    }

    /// Receive a snapshot every time the session changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.updates.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.lock_state().clone()
    }

    #[must_use]
    pub fn transcript(&self) -> Vec<Turn> {
        self.lock_state().transcript.as_slice().to_vec()
    }

    #[must_use]
    pub fn thread_id(&self) -> Option<String> {
        self.lock_state().thread_id.clone()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.lock_state().pending()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.lock_state().last_error.clone()
    }

    /// The underlying single-attempt transport
    #[must_use]
    pub fn transport(&self) -> &T {
        self.transport.inner()
    }

    /// Send one user turn and wait for the assistant's answer.
    ///
    /// Blank input and calls made while another submission is in flight are
    /// ignored. Transport failures never escape: they become an apology turn
    /// plus `last_error`.
    pub async fn submit(&self, user_text: &str) -> SubmitOutcome {
        let request = match self.begin_exchange(user_text) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(reason = %e, "Submission ignored");
                return SubmitOutcome::Ignored(e);
            }
        };

        let guard = PendingGuard::new(self);
        let result = self.transport.send(&request).await;
        guard.disarm();

        let (event, outcome) = match result {
            Ok(reply) => (
                SessionEvent::ReplyReceived { reply },
                SubmitOutcome::Answered,
            ),
            Err(error) => {
                let kind = error.kind;
                (SessionEvent::ExchangeFailed { error }, SubmitOutcome::Failed(kind))
            }
        };

        if let Err(e) = self.dispatch(event) {
            tracing::warn!(error = %e, "Exchange result arrived with no exchange in flight");
        }
        outcome
    }

    /// Accept `user_text` as the next turn and return the request carrying it
    fn begin_exchange(&self, user_text: &str) -> Result<ChatRequest, TransitionError> {
        match self.dispatch(SessionEvent::submit(user_text))? {
            Some(request) => Ok(request),
            None => unreachable!("accepted submission emitted no SendMessage"),
        }
    }

    /// Run one transition and apply its effects. Returns the request to send, if any.
    fn dispatch(&self, event: SessionEvent) -> Result<Option<ChatRequest>, TransitionError> {
        let mut state = self.lock_state();
        let result = transition(&state, event)?;

        state.phase = result.new_phase;
        let mut outgoing = None;
        let mut notify = false;
        for effect in result.effects {
            match effect {
                Effect::AppendTurn(turn) => state.transcript.push(turn),
                Effect::SetThread(thread_id) => state.thread_id = Some(thread_id),
                Effect::ClearError => state.last_error = None,
                Effect::RecordError(message) => state.last_error = Some(message),
                Effect::SendMessage(request) => outgoing = Some(request),
                Effect::Notify => notify = true,
            }
        }

        if notify {
            self.updates.send_replace(state.clone());
        }
        Ok(outgoing)
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the session to idle if a submission is dropped mid-flight
struct PendingGuard<'a, T: ChatTransport> {
    session: &'a ChatSession<T>,
    armed: bool,
}

impl<'a, T: ChatTransport> PendingGuard<'a, T> {
    fn new(session: &'a ChatSession<T>) -> Self {
        Self {
            session,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<T: ChatTransport> Drop for PendingGuard<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.session.lock_state();
        if state.pending() {
            tracing::warn!("Submission dropped before the exchange finished");
            state.phase = Phase::Idle;
            self.session.updates.send_replace(state.clone());
        }
    }
}
