//! Conversation session state types

use serde::{Deserialize, Serialize};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message unit in the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Append-only, ordered record of the conversation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Transcript(Vec<Turn>);

impl Transcript {
    pub(crate) fn push(&mut self, turn: Turn) {
        self.0.push(turn);
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Turn] {
        &self.0
    }

    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Turn> {
        self.0.last()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Whether an exchange is in flight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Ready for user input
    #[default]
    Idle,
    /// A request is in flight; further submissions are rejected
    Awaiting,
}

/// Everything the presentation layer renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub transcript: Transcript,
    /// Opaque id assigned by the service after the first successful exchange
    pub thread_id: Option<String>,
    pub phase: Phase,
    /// User-facing error from the most recent failed exchange
    pub last_error: Option<String>,
}

impl SessionState {
    #[must_use]
    pub fn pending(&self) -> bool {
        self.phase == Phase::Awaiting
    }
}
