//! Request authentication
//!
//! An [`Authenticator`] yields the value of the `Authorization` header for
//! the next request. The transport asks for it on every call, so token
//! refresh stays invisible to the wrapper layer.

use std::sync::Arc;

use async_trait::async_trait;
use compliance_domain::{AuthConfig, Result};

use crate::http::HttpClient;

pub mod api_key;

pub use api_key::ApiKeyAuthenticator;

/// Source of the `Authorization` header
#[async_trait]
pub trait Authenticator: Send + Sync + std::fmt::Debug {
    /// Full header value (e.g. `Bearer abc`), or `None` to send no header.
    ///
    /// # Errors
    /// Returns `ComplianceError::Auth` when credentials cannot be obtained.
    async fn authorization(&self) -> Result<Option<String>>;

    /// Short scheme name for logs.
    fn scheme(&self) -> &'static str;
}

/// Sends requests without credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuthAuthenticator;

#[async_trait]
impl Authenticator for NoAuthAuthenticator {
    async fn authorization(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn scheme(&self) -> &'static str {
        "none"
    }
}

/// Attaches a fixed bearer token.
#[derive(Clone)]
pub struct BearerTokenAuthenticator {
    token: String,
}

impl BearerTokenAuthenticator {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

impl std::fmt::Debug for BearerTokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenAuthenticator").field("token", &"<redacted>").finish()
    }
}

#[async_trait]
impl Authenticator for BearerTokenAuthenticator {
    async fn authorization(&self) -> Result<Option<String>> {
        Ok(Some(format!("Bearer {}", self.token)))
    }

    fn scheme(&self) -> &'static str {
        "bearer"
    }
}

/// Build the authenticator described by `config`.
///
/// The API-key variant reuses `http` for its token exchange.
pub fn from_config(config: &AuthConfig, http: HttpClient) -> Arc<dyn Authenticator> {
    match config {
        AuthConfig::None => Arc::new(NoAuthAuthenticator),
        AuthConfig::Bearer { token } => Arc::new(BearerTokenAuthenticator::new(token.clone())),
        AuthConfig::ApiKey { api_key, token_url } => {
            Arc::new(ApiKeyAuthenticator::new(http, api_key.clone(), token_url.clone()))
        }
    }
}
