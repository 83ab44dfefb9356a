use std::time::Duration;

use compliance_domain::constants::{
    DEFAULT_BACKOFF_CEILING_MS, DEFAULT_BASE_BACKOFF_MS, DEFAULT_MAX_RETRIES,
    DEFAULT_TIMEOUT_SECS, USER_AGENT,
};
use compliance_domain::{ComplianceError, Result, RetryConfig};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};

use crate::errors::InfraError;

/// HTTP client with built-in retry and timeout support.
///
/// Only idempotent methods are replayed. A `POST` gets exactly one attempt.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    timeout: Duration,
    max_retries: u32,
    base_backoff: Duration,
    backoff_ceiling: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Execute the provided request builder with retry semantics.
    ///
    /// Retries connect failures, timeouts, `429` and `5xx` answers with capped
    /// exponential backoff. Once retries run out the last response is
    /// returned as is, so the caller still sees the real status.
    ///
    /// # Errors
    /// - `Timeout` when the single attempt of a non-idempotent request times
    ///   out
    /// - `RetriesExhausted` when every attempt failed at the network level
    /// - `Network` for other transport failures
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let probe = builder
            .try_clone()
            .ok_or_else(|| {
                ComplianceError::Internal(
                    "request body cannot be cloned; buffer the body to enable retries".into(),
                )
            })?
            .build()
            .map_err(|err| ComplianceError::from(InfraError::from(err)))?;

        let attempts =
            if is_idempotent(probe.method()) { self.max_retries as usize + 1 } else { 1 };

        for attempt in 0..attempts {
            let has_next = attempt + 1 < attempts;
            let cloned_builder = builder.try_clone().ok_or_else(|| {
                ComplianceError::Internal("request body cannot be cloned".into())
            })?;

            let request = cloned_builder
                .build()
                .map_err(|err| ComplianceError::from(InfraError::from(err)))?;

            let method = request.method().clone();
            let url = request.url().clone();
            debug!(attempt = attempt + 1, %method, %url, "sending HTTP request");

            match self.client.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt = attempt + 1, %method, %url, %status, "received HTTP response");

                    if has_next && should_retry_status(status) {
                        let delay = self.retry_delay(attempt + 1, response.headers());
                        warn!(attempt = attempt + 1, %status, ?delay, "retrying HTTP request");
                        sleep(delay).await;
                        continue;
                    }

                    return Ok(response);
                }
                Err(err) => {
                    debug!(
                        attempt = attempt + 1,
                        %method,
                        %url,
                        error = %err,
                        "HTTP request failed"
                    );

                    if !should_retry_error(&err) {
                        return Err(InfraError::from(err).into());
                    }

                    if has_next {
                        sleep(self.backoff_delay(attempt + 1)).await;
                        continue;
                    }

                    if attempts > 1 {
                        return Err(ComplianceError::RetriesExhausted {
                            attempts,
                            last: err.to_string(),
                        });
                    }

                    if err.is_timeout() {
                        return Err(ComplianceError::Timeout(self.timeout));
                    }

                    return Err(InfraError::from(err).into());
                }
            }
        }

        Err(ComplianceError::Internal(
            "http client exhausted retries without producing a result".into(),
        ))
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = retry_number.saturating_sub(1).min(16) as u32;
        let multiplier = 1u32 << shift;
        self.base_backoff.saturating_mul(multiplier).min(self.backoff_ceiling)
    }

    /// Honour a `Retry-After` seconds value when present, bounded by the
    /// ceiling.
    fn retry_delay(&self, retry_number: usize, headers: &HeaderMap) -> Duration {
        headers
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(|secs| Duration::from_secs(secs).min(self.backoff_ceiling))
            .unwrap_or_else(|| self.backoff_delay(retry_number))
    }
}

async fn sleep(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_retries: u32,
    base_backoff: Duration,
    backoff_ceiling: Duration,
    user_agent: String,
    default_headers: Option<HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            base_backoff: Duration::from_millis(DEFAULT_BASE_BACKOFF_MS),
            backoff_ceiling: Duration::from_millis(DEFAULT_BACKOFF_CEILING_MS),
            user_agent: USER_AGENT.to_string(),
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the number of retries after the initial attempt.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn backoff_ceiling(mut self, ceiling: Duration) -> Self {
        self.backoff_ceiling = ceiling;
        self
    }

    /// Apply every retry setting from a [`RetryConfig`].
    pub fn retry(self, retry: &RetryConfig) -> Self {
        self.max_retries(retry.max_retries)
            .base_backoff(retry.base_backoff())
            .backoff_ceiling(retry.backoff_ceiling())
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut builder =
            ReqwestClient::builder().timeout(self.timeout).user_agent(self.user_agent).no_proxy();

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| ComplianceError::from(InfraError::from(err)))?;

        Ok(HttpClient {
            client,
            timeout: self.timeout,
            max_retries: self.max_retries,
            base_backoff: self.base_backoff,
            backoff_ceiling: self.backoff_ceiling.max(self.base_backoff),
        })
    }
}

fn is_idempotent(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::PUT | Method::DELETE | Method::HEAD | Method::OPTIONS)
}

fn should_retry_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

fn should_retry_error(err: &reqwest::Error) -> bool {
    if err.is_timeout() {
        return true;
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        if err.is_connect() {
            return true;
        }
    }
    false
}
