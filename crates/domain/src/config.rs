//! Client configuration structures
//!
//! Consumed by bootstrap and test code only. The wrapper layer never reads
//! configuration; it receives a ready transport.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BACKOFF_CEILING_MS, DEFAULT_BASE_BACKOFF_MS, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS,
};
use crate::errors::{ComplianceError, Result};

/// Top-level client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service base URL, e.g. `https://compliance.example.com/api`
    pub service_url: String,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ClientConfig {
    pub fn new(service_url: impl Into<String>, auth: AuthConfig) -> Self {
        Self {
            service_url: service_url.into(),
            auth,
            account_id: None,
            instance_id: None,
            retry: RetryConfig::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check the values that cannot be defaulted.
    ///
    /// # Errors
    /// Returns `ComplianceError::Config` when the URL does not parse or the
    /// selected auth scheme lacks its credential.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.service_url).map_err(|e| {
            ComplianceError::Config(format!("Invalid service URL '{}': {}", self.service_url, e))
        })?;

        match &self.auth {
            AuthConfig::None => {}
            AuthConfig::Bearer { token } if token.is_empty() => {
                return Err(ComplianceError::Config("Bearer token is empty".into()));
            }
            AuthConfig::ApiKey { api_key, token_url } => {
                if api_key.is_empty() {
                    return Err(ComplianceError::Config("API key is empty".into()));
                }
                url::Url::parse(token_url).map_err(|e| {
                    ComplianceError::Config(format!("Invalid token URL '{}': {}", token_url, e))
                })?;
            }
            AuthConfig::Bearer { .. } => {}
        }

        if self.timeout_secs == 0 {
            return Err(ComplianceError::Config("timeout_secs must be greater than 0".into()));
        }

        Ok(())
    }
}

/// Authentication scheme attached to every request.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    #[default]
    None,
    Bearer {
        token: String,
    },
    ApiKey {
        api_key: String,
        token_url: String,
    },
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"<redacted>").finish(),
            Self::ApiKey { token_url, .. } => f
                .debug_struct("ApiKey")
                .field("api_key", &"<redacted>")
                .field("token_url", token_url)
                .finish(),
        }
    }
}

/// Retry policy for the transport core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the initial attempt; 0 disables retrying
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_base_backoff_ms")]
    pub base_backoff_ms: u64,
    /// Upper bound for a single backoff delay
    #[serde(default = "default_backoff_ceiling_ms")]
    pub backoff_ceiling_ms: u64,
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_base_backoff_ms() -> u64 {
    DEFAULT_BASE_BACKOFF_MS
}

fn default_backoff_ceiling_ms() -> u64 {
    DEFAULT_BACKOFF_CEILING_MS
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_backoff_ms: DEFAULT_BASE_BACKOFF_MS,
            backoff_ceiling_ms: DEFAULT_BACKOFF_CEILING_MS,
        }
    }
}

impl RetryConfig {
    /// No retries at all.
    pub fn disabled() -> Self {
        Self { max_retries: 0, ..Self::default() }
    }

    pub fn base_backoff(&self) -> Duration {
        Duration::from_millis(self.base_backoff_ms)
    }

    pub fn backoff_ceiling(&self) -> Duration {
        Duration::from_millis(self.backoff_ceiling_ms)
    }
}
