//! Port interface for the HTTP transport
//!
//! The wrapper layer builds an [`ApiRequest`] and hands it to a [`Transport`].
//! The transport owns everything below that line: base URL, authentication,
//! retries, timeouts and status-to-error mapping.

use std::collections::HashMap;

use async_trait::async_trait;
use compliance_domain::Result;
use serde_json::Value;

/// HTTP verbs used by the compliance API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built request, relative to the service base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Percent-encoded path starting with `/`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), headers: Vec::new(), body: None }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a query parameter only when a value is present.
    pub fn query_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Successful (2xx) answer from the transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawResponse {
    pub status_code: u16,
    /// Header names lowercased
    pub headers: HashMap<String, String>,
    /// Parsed JSON body; `None` when the body was empty
    pub body: Option<Value>,
}

impl RawResponse {
    pub fn new(status_code: u16, body: Option<Value>) -> Self {
        Self { status_code, headers: HashMap::new(), body }
    }
}

/// Trait for sending one request to the service
///
/// Implementations must be safe to share across tasks: a single transport
/// serves every call of a [`crate::ComplianceService`].
///
/// Non-2xx statuses are reported as `Err(ComplianceError::Api(..))` or
/// `Err(ComplianceError::Auth(..))`, never as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse>;
}
