//! reqwest-backed transport for `POST /api/chat`

use super::types::{ChatReply, ChatRequest, WireError, WireReply};
use super::{ChatTransport, TransportError};
use crate::config::ChatConfig;
use async_trait::async_trait;
use reqwest::Client;

/// One physical attempt against the remote chat endpoint
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Fails if the underlying reqwest client cannot be built (e.g. no TLS backend).
    pub fn new(config: &ChatConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            endpoint: config.chat_endpoint(),
        })
    }

    fn classify_send_error(e: &reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::timeout(format!("Request timeout: {e}"))
        } else if e.is_connect() {
            TransportError::network(format!("Connection failed: {e}"))
        } else {
            TransportError::network(format!("Request failed: {e}"))
        }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| Self::classify_send_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::timeout(format!("Timed out reading response: {e}"))
            } else {
                TransportError::network(format!("Failed to read response: {e}"))
            }
        })?;

        if !status.is_success() {
            return Err(TransportError::server(
                status.as_u16(),
                WireError::message_from(&body),
            ));
        }

        let wire: WireReply = serde_json::from_str(&body).map_err(|e| {
            TransportError::malformed(format!("Failed to parse response: {e} - body: {body}"))
        })?;

        wire.validate()
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
