use crate::domain::errors::TransportError;
use crate::domain::ports::{HttpTransport, TransportRequest, TransportResponse};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

type Scripted = Result<TransportResponse, TransportError>;

/// Scripted `HttpTransport` for offline runs and tests.
///
/// Responses are replayed in order; every request is captured so callers
/// can assert on what would have gone over the wire.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<TransportRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_json(&self, status: u16, body: Value) -> &Self {
        self.push(Ok(TransportResponse {
            status,
            body: body.to_string(),
        }))
    }

    pub fn respond_text(&self, status: u16, body: &str) -> &Self {
        self.push(Ok(TransportResponse {
            status,
            body: body.to_string(),
        }))
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.push(Err(TransportError::new(message)))
    }

    /// Number of requests that reached the transport
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        lock(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<TransportRequest> {
        lock(&self.requests).last().cloned()
    }

    fn push(&self, scripted: Scripted) -> &Self {
        lock(&self.responses).push_back(scripted);
        self
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        debug!("MockTransport: {:?} {}", request.method, request.url);
        lock(&self.requests).push(request);

        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("MockTransport: no scripted response")))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
