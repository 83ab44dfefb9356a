//! API-key authenticator with token caching
//!
//! Exchanges an API key for an access token at the identity service and keeps
//! the token in memory:
//! - the first call fetches a token
//! - later calls reuse it until it is within the refresh window of expiry
//! - concurrent callers share one exchange behind the write lock

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use compliance_domain::constants::{API_KEY_GRANT_TYPE, TOKEN_REFRESH_WINDOW_SECS};
use compliance_domain::{ComplianceError, Result};
use reqwest::header::ACCEPT;
use reqwest::Method;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::Authenticator;
use crate::http::HttpClient;

/// Token endpoint answer.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    /// Lifetime in seconds
    #[serde(default)]
    expires_in: Option<i64>,
    /// Absolute expiry as a Unix timestamp
    #[serde(default)]
    expiration: Option<i64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    header_value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn from_response(response: TokenResponse, now: DateTime<Utc>) -> Self {
        let expires_at = response
            .expiration
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .or_else(|| {
                response
                    .expires_in
                    .and_then(Duration::try_seconds)
                    .and_then(|lifetime| now.checked_add_signed(lifetime))
            })
            .unwrap_or(now);
        let token_type = response.token_type.unwrap_or_else(|| "Bearer".to_string());
        Self { header_value: format!("{token_type} {}", response.access_token), expires_at }
    }

    fn needs_refresh(&self, window: Duration, now: DateTime<Utc>) -> bool {
        match now.checked_add_signed(window) {
            Some(deadline) => deadline >= self.expires_at,
            None => true,
        }
    }
}

/// Authenticates with an API key exchanged for short-lived access tokens.
pub struct ApiKeyAuthenticator {
    http: HttpClient,
    api_key: String,
    token_url: String,
    refresh_window: Duration,
    cached: RwLock<Option<CachedToken>>,
}

impl ApiKeyAuthenticator {
    pub fn new(http: HttpClient, api_key: impl Into<String>, token_url: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            token_url: token_url.into(),
            refresh_window: Duration::seconds(TOKEN_REFRESH_WINDOW_SECS),
            cached: RwLock::new(None),
        }
    }

    /// Override how long before expiry a token is replaced.
    pub fn with_refresh_window(mut self, window: Duration) -> Self {
        self.refresh_window = window;
        self
    }

    /// Drop the cached token so the next call fetches a new one.
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }

    async fn fetch_token(&self) -> Result<CachedToken> {
        debug!(token_url = %self.token_url, "requesting access token");

        let form = [("grant_type", API_KEY_GRANT_TYPE), ("apikey", self.api_key.as_str())];
        let builder = self
            .http
            .request(Method::POST, self.token_url.as_str())
            .header(ACCEPT, "application/json")
            .form(&form);

        let response = self.http.send(builder).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ComplianceError::Auth(format!(
                "token exchange failed with status {}: {}",
                status.as_u16(),
                body.chars().take(200).collect::<String>()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ComplianceError::Auth(format!("invalid token response: {e}")))?;

        let cached = CachedToken::from_response(token, Utc::now());
        info!(expires_at = %cached.expires_at, "access token acquired");
        Ok(cached)
    }
}

impl std::fmt::Debug for ApiKeyAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuthenticator")
            .field("api_key", &"<redacted>")
            .field("token_url", &self.token_url)
            .field("refresh_window", &self.refresh_window)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Authenticator for ApiKeyAuthenticator {
    async fn authorization(&self) -> Result<Option<String>> {
        {
            let cached = self.cached.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.needs_refresh(self.refresh_window, Utc::now()) {
                    return Ok(Some(token.header_value.clone()));
                }
            }
        }

        let mut cached = self.cached.write().await;
        // Another caller may have refreshed while we waited for the lock.
        if let Some(token) = cached.as_ref() {
            if !token.needs_refresh(self.refresh_window, Utc::now()) {
                return Ok(Some(token.header_value.clone()));
            }
        }

        let token = self.fetch_token().await?;
        let header_value = token.header_value.clone();
        *cached = Some(token);
        Ok(Some(header_value))
    }

    fn scheme(&self) -> &'static str {
        "api_key"
    }
}
