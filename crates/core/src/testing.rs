//! In-memory [`Transport`] for unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use compliance_domain::{ComplianceError, Result};
use serde_json::Value;

use crate::transport::{ApiRequest, RawResponse, Transport};

/// Records every request and replays queued responses in order.
///
/// Once the queue is empty every call answers `200` with an empty body.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<Result<RawResponse>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful JSON answer.
    pub fn respond_json(&self, status_code: u16, body: Value) -> &Self {
        self.push(Ok(RawResponse::new(status_code, Some(body))));
        self
    }

    /// Queue a successful answer without a body.
    pub fn respond_empty(&self, status_code: u16) -> &Self {
        self.push(Ok(RawResponse::new(status_code, None)));
        self
    }

    pub fn respond_error(&self, error: ComplianceError) -> &Self {
        self.push(Err(error));
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().map(|requests| requests.len()).unwrap_or_default()
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().map(|requests| requests.clone()).unwrap_or_default()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().ok().and_then(|requests| requests.last().cloned())
    }

    fn push(&self, response: Result<RawResponse>) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response);
        }
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        self.requests
            .lock()
            .map_err(|_| ComplianceError::Internal("request log poisoned".into()))?
            .push(request);

        self.responses
            .lock()
            .map_err(|_| ComplianceError::Internal("response queue poisoned".into()))?
            .pop_front()
            .unwrap_or_else(|| Ok(RawResponse::new(200, None)))
    }
}
