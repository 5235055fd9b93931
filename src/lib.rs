//! Customer-support chat client for the book store
//!
//! A [`ChatSession`](session::ChatSession) keeps the transcript and thread id
//! of one conversation and sends each user turn through a
//! [`ChatTransport`](transport::ChatTransport) to `POST {API_BASE_URL}/api/chat`.

pub mod config;
pub mod console;
pub mod session;
pub mod transport;

#[cfg(test)]
mod testing;

pub use config::{ChatConfig, ConfigError};
pub use session::{ChatSession, SessionState, SubmitOutcome, Turn};
pub use transport::{ChatTransport, HttpTransport, LoggingTransport, TransportError};
