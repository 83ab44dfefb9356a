//! Service bootstrap
//!
//! Wires a [`ClientConfig`] into the HTTP client, the authenticator and the
//! transport, and hands back a ready [`ComplianceService`].

use std::sync::Arc;

use compliance_core::ComplianceService;
use compliance_domain::{ClientConfig, Result};
use tracing::info;

use crate::auth::{self, Authenticator};
use crate::http::HttpClient;
use crate::transport::HttpTransport;

/// Builds a [`ComplianceService`] backed by [`HttpTransport`].
///
/// The HTTP client and authenticator default to what the config describes;
/// either can be replaced before `build`.
#[derive(Debug)]
pub struct ComplianceClientBuilder {
    config: ClientConfig,
    http: Option<HttpClient>,
    authenticator: Option<Arc<dyn Authenticator>>,
}

impl ComplianceClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self { config, http: None, authenticator: None }
    }

    /// Use a preconfigured HTTP client instead of one built from the config.
    pub fn http_client(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Use a custom authenticator instead of the configured scheme.
    pub fn authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// # Errors
    /// Returns `ComplianceError::Config` when the configuration is invalid
    /// or the HTTP client cannot be created.
    pub fn build(self) -> Result<ComplianceService<HttpTransport>> {
        self.config.validate()?;

        let http = match self.http {
            Some(http) => http,
            None => HttpClient::builder()
                .timeout(self.config.timeout())
                .retry(&self.config.retry)
                .build()?,
        };

        let authenticator = self
            .authenticator
            .unwrap_or_else(|| auth::from_config(&self.config.auth, http.clone()));

        info!(
            service_url = %self.config.service_url,
            auth = authenticator.scheme(),
            max_retries = http.max_retries(),
            "compliance client configured"
        );

        let transport = HttpTransport::new(http, &self.config.service_url, authenticator)?;
        Ok(ComplianceService::new(transport))
    }
}

/// Build a service straight from configuration.
///
/// # Errors
/// See [`ComplianceClientBuilder::build`].
pub fn build_service(config: &ClientConfig) -> Result<ComplianceService<HttpTransport>> {
    ComplianceClientBuilder::new(config.clone()).build()
}

#[cfg(test)]
mod tests {
    use compliance_core::options::GetProfileOptions;
    use compliance_domain::{AuthConfig, ComplianceError};
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::auth::BearerTokenAuthenticator;

    #[test]
    fn rejects_invalid_config() {
        let config = ClientConfig::new("::not a url::", AuthConfig::None);
        let err = build_service(&config).unwrap_err();
        assert!(matches!(err, ComplianceError::Config(_)));
    }

    #[tokio::test]
    async fn built_service_reaches_server_with_configured_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/instances/inst-1/v3/profiles/prof-1"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({
                    "id": "prof-1",
                    "profile_name": "p1",
                    "profile_type": "custom"
                })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig::new(server.uri(), AuthConfig::Bearer { token: "tok-1".into() });
        let service = build_service(&config).unwrap();

        let response =
            service.get_profile(&GetProfileOptions::new("inst-1", "prof-1")).await.unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.result.unwrap().id.as_deref(), Some("prof-1"));
    }

    #[tokio::test]
    async fn custom_authenticator_overrides_config() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer override"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "prof-1",
                "profile_name": "p1",
                "profile_type": "custom"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig::new(server.uri(), AuthConfig::None);
        let service = ComplianceClientBuilder::new(config)
            .authenticator(Arc::new(BearerTokenAuthenticator::new("override")))
            .build()
            .unwrap();

        service.get_profile(&GetProfileOptions::new("inst-1", "prof-1")).await.unwrap();
    }
}
