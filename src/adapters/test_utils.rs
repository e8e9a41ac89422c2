//! Shared test utilities for service testing
//!
//! `MockTransport` replays scripted responses in order and records every
//! request it receives, so tests can assert on the exact wire request or on
//! the absence of any network call.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::adapters::errors::{TransportError, TransportResult};
use crate::adapters::transport::{RestRequest, RestResponse, RestTransport};

/// Scripted in-memory transport; clones share the same script and log
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<TransportResult<RestResponse>>>>,
    requests: Arc<Mutex<Vec<RestRequest>>>,
    /// Number of `execute` calls (thread-safe for async tests)
    pub call_count: Arc<AtomicU64>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock whose first call answers `status` with `body`
    pub fn with_response(status: u16, body: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.push_response(status, body);
        mock
    }

    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        self.push(Ok(RestResponse::new(status, body)));
    }

    pub fn push_error(&self, error: TransportError) {
        self.push(Err(error));
    }

    fn push(&self, outcome: TransportResult<RestResponse>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(outcome);
        }
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Snapshot of every request received so far
    pub fn requests(&self) -> Vec<RestRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn last_request(&self) -> Option<RestRequest> {
        self.requests().pop()
    }
}

#[async_trait]
impl RestTransport for MockTransport {
    async fn execute(&self, request: RestRequest) -> TransportResult<RestResponse> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut log) = self.requests.lock() {
            log.push(request);
        }
        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or_else(|| Err(TransportError::Request("no scripted response".into())))
    }
}
