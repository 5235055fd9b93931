//! Terminal front end for a chat session

use crate::session::{ChatSession, Role, SessionState, SubmitOutcome, TransitionError};
use crate::transport::ChatTransport;
use std::io::Write;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders session snapshots incrementally
pub struct Console<W> {
    out: W,
    shown_turns: usize,
    typing_shown: bool,
}

impl<W: Write> Console<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown_turns: 0,
            typing_shown: false,
        }
    }

    /// # Errors
    ///
    /// Propagates write or flush failures of the output.
    pub fn banner(&mut self) -> std::io::Result<()> {
        writeln!(self.out, "Customer Support")?;
        writeln!(self.out, "Type a message and press enter. /reset starts over, /quit exits.")?;
        self.out.flush()
    }

    /// # Errors
    ///
    /// Propagates write or flush failures of the output.
    pub fn prompt(&mut self) -> std::io::Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()
    }

    /// Print turns not yet shown, plus a typing indicator while pending
    ///
    /// # Errors
    ///
    /// Propagates write or flush failures of the output.
    pub fn render(&mut self, state: &SessionState) -> std::io::Result<()> {
        for turn in state.transcript.iter().skip(self.shown_turns) {
            let label = match turn.role {
                Role::User => "You",
                Role::Assistant => "Support",
            };
            writeln!(self.out, "{label}: {}", turn.content)?;
        }
        self.shown_turns = state.transcript.len();

        if state.pending() && !self.typing_shown {
            writeln!(self.out, "Typing...")?;
        }
        self.typing_shown = state.pending();
        self.out.flush()
    }

    /// # Errors
    ///
    /// Propagates write or flush failures of the output.
    pub fn notice(&mut self, text: &str) -> std::io::Result<()> {
        writeln!(self.out, "[{text}]")?;
        self.out.flush()
    }

    /// Forget what was shown; the next render starts from an empty transcript
    pub fn reset(&mut self) {
        self.shown_turns = 0;
        self.typing_shown = false;
    }
}

/// Read lines from `input` and chat until `/quit` or end of input.
///
/// `new_session` is called once at start and again on every `/reset`; the
/// previous session and its transcript are dropped.
///
/// # Errors
///
/// Returns [`ConsoleError::Io`] when reading input or writing output fails.
pub async fn run<R, W, T, F>(input: R, out: W, mut new_session: F) -> Result<(), ConsoleError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    T: ChatTransport,
    F: FnMut() -> ChatSession<T>,
{
    let mut lines = input.lines();
    let mut console = Console::new(out);
    let mut session = new_session();

    console.banner()?;
    loop {
        console.prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match line.trim() {
            "/quit" => break,
            "/reset" => {
                session = new_session();
                console.reset();
                console.notice("started a new conversation")?;
                continue;
            }
            _ => {}
        }

        let mut updates = session.subscribe();
        let submit = session.submit(&line);
        tokio::pin!(submit);
        let outcome = loop {
            tokio::select! {
                outcome = &mut submit => break outcome,
                Ok(()) = updates.changed() => {
                    let snapshot = updates.borrow_and_update().clone();
                    console.render(&snapshot)?;
                }
            }
        };
        console.render(&session.snapshot())?;

        match outcome {
            SubmitOutcome::Answered | SubmitOutcome::Ignored(TransitionError::EmptyMessage) => {}
            SubmitOutcome::Failed(_) => {
                if let Some(error) = session.last_error() {
                    console.notice(&error)?;
                }
            }
            SubmitOutcome::Ignored(reason) => console.notice(&reason.to_string())?,
        }
    }

    tracing::debug!("Console closed");
    Ok(())
}
