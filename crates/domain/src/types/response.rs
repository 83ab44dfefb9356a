//! Response envelope returned by every wrapper call.

use std::collections::HashMap;

/// Decoded body plus the raw status metadata of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedResponse<T> {
    pub status_code: u16,
    /// Response headers, keys lowercased
    pub headers: HashMap<String, String>,
    /// `None` when the service answered with an empty body (e.g. deletes)
    pub result: Option<T>,
}

impl<T> DetailedResponse<T> {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Consume the envelope and keep the decoded body.
    pub fn into_result(self) -> Option<T> {
        self.result
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DetailedResponse<U> {
        DetailedResponse {
            status_code: self.status_code,
            headers: self.headers,
            result: self.result.map(f),
        }
    }
}
