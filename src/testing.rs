//! Mock implementations for testing

use crate::transport::{ChatReply, ChatRequest, ChatTransport, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Mock transport that returns queued results and records every attempt
pub struct MockTransport {
    results: Mutex<VecDeque<Result<ChatReply, TransportError>>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<ChatRequest>>,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Sleep this long inside every `send`, after recording the request
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a successful reply
    pub fn queue_reply(&self, reply: ChatReply) {
        self.results.lock().unwrap().push_back(Ok(reply));
    }

    /// Queue a failure
    pub fn queue_error(&self, error: TransportError) {
        self.results.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of physical attempts made so far
    pub fn attempts(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::network("No mock result queued")))
    }

    fn endpoint(&self) -> &str {
        "mock://chat"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport() {
        let mock = MockTransport::new();
        mock.queue_reply(ChatReply::new("Hello", "t1"));

        let request = ChatRequest::new("hi", None);
        let reply = mock.send(&request).await.unwrap();
        assert_eq!(reply.message, "Hello");

        // Second call should fail (nothing queued)
        assert!(mock.send(&request).await.is_err());
        assert_eq!(mock.recorded_requests(), vec![request.clone(), request]);
    }
}
