//! Error types used throughout the client

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the service for non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
    #[serde(default)]
    pub errors: Vec<ApiErrorItem>,
}

/// A single entry of [`ApiErrorBody::errors`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorItem {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_info: Option<String>,
}

impl ApiErrorBody {
    /// First error message reported by the service, if any.
    pub fn first_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str()).filter(|m| !m.is_empty())
    }
}

/// Remote application failure: the service answered with a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status_code: u16,
    pub message: String,
    /// Decoded error body, `None` when the body was empty or not JSON.
    pub body: Option<ApiErrorBody>,
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "status {}: {}", self.status_code, self.message)
    }
}

/// Coarse classification of [`ComplianceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Raised locally before any network call
    Validation,
    /// Connection failures, timeouts, exhausted retries, auth plumbing
    Transport,
    /// Non-2xx answer from the service
    Remote,
    /// Serialization, configuration and invariant failures
    Internal,
}

/// Main error type for the compliance client
#[derive(Error, Debug)]
pub enum ComplianceError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Retries exhausted after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: usize, last: String },

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Service error: {0}")]
    Api(Box<ApiFailure>),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ComplianceError {
    /// Build a remote error from a status code and optional decoded body.
    pub fn api(status_code: u16, message: impl Into<String>, body: Option<ApiErrorBody>) -> Self {
        Self::Api(Box::new(ApiFailure { status_code, message: message.into(), body }))
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingField(_) | Self::InvalidInput(_) => ErrorCategory::Validation,
            Self::Network(_) | Self::Timeout(_) | Self::RetriesExhausted { .. } | Self::Auth(_) => {
                ErrorCategory::Transport
            }
            Self::Api(_) => ErrorCategory::Remote,
            Self::Serialization(_) | Self::Config(_) | Self::Internal(_) => ErrorCategory::Internal,
        }
    }

    /// HTTP status carried by the error, if the service produced one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(failure) => Some(failure.status_code),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Whether the transport layer may replay the request that produced this
    /// error.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Api(failure) => failure.status_code == 429 || failure.status_code >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ComplianceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for compliance client operations
pub type Result<T> = std::result::Result<T, ComplianceError>;
