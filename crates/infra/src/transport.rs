//! reqwest-backed implementation of the core [`Transport`] port

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use compliance_core::{ApiRequest, HttpMethod, RawResponse, Transport};
use compliance_domain::{ApiErrorBody, ComplianceError, Result};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::auth::Authenticator;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Sends wrapper requests over HTTPS.
///
/// Joins the base URL with the request path and query, attaches the
/// `Authorization` header from the authenticator and maps the answer:
/// 2xx becomes a [`RawResponse`], 401/403 become `Auth`, every other status
/// becomes `Api` with the decoded error body.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: HttpClient,
    base_url: Url,
    auth: Arc<dyn Authenticator>,
}

impl HttpTransport {
    /// # Errors
    /// Returns `ComplianceError::Config` when `base_url` is not a valid URL.
    pub fn new(http: HttpClient, base_url: &str, auth: Arc<dyn Authenticator>) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/')).map_err(InfraError::from)?;
        Ok(Self { http, base_url, auth })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let joined = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), request.path);
        let mut url = Url::parse(&joined).map_err(InfraError::from)?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let url = self.url_for(&request)?;

        let mut builder = self
            .http
            .request(to_reqwest_method(request.method), url.clone())
            .header(ACCEPT, "application/json");
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(authorization) = self.auth.authorization().await? {
            builder = builder.header(AUTHORIZATION, authorization);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(method = %request.method, %url, auth = self.auth.scheme(), "sending API request");
        let response = self.http.send(builder).await?;

        let status = response.status();
        let headers = lowercase_headers(response.headers());
        let bytes = response.bytes().await.map_err(InfraError::from)?;

        if status.is_success() {
            let body = parse_success_body(&bytes, status)?;
            return Ok(RawResponse { status_code: status.as_u16(), headers, body });
        }

        let error = error_for_status(status, &bytes);
        warn!(
            method = %request.method,
            %url,
            status = status.as_u16(),
            error = %error,
            "API request failed"
        );
        Err(error)
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn lowercase_headers(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value.to_str().ok().map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
        })
        .collect()
}

fn parse_success_body(bytes: &[u8], status: StatusCode) -> Result<Option<Value>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(bytes).map(Some).map_err(|e| {
        ComplianceError::Serialization(format!(
            "response with status {} is not valid JSON: {e}",
            status.as_u16()
        ))
    })
}

/// Map a non-2xx answer to the domain error, keeping whatever the body says.
fn error_for_status(status: StatusCode, bytes: &[u8]) -> ComplianceError {
    let code = status.as_u16();
    let value: Option<Value> = serde_json::from_slice(bytes).ok();
    let body = value.as_ref().and_then(|v| serde_json::from_value::<ApiErrorBody>(v.clone()).ok());

    let message = body
        .as_ref()
        .and_then(ApiErrorBody::first_message)
        .map(str::to_string)
        .or_else(|| {
            value.as_ref().and_then(|v| {
                ["message", "error", "errorMessage"]
                    .iter()
                    .find_map(|key| v.get(*key).and_then(Value::as_str))
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown status").to_string());

    match code {
        401 | 403 => ComplianceError::Auth(format!("HTTP {code}: {message}")),
        _ => ComplianceError::api(code, message, body),
    }
}
