//! Conversions from external infrastructure errors into domain errors.

use compliance_domain::ComplianceError;
use reqwest::Error as HttpError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ComplianceError);

impl From<InfraError> for ComplianceError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ComplianceError> for InfraError {
    fn from(value: ComplianceError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoComplianceError {
    fn into_compliance(self) -> ComplianceError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ComplianceError */
/* -------------------------------------------------------------------------- */

impl IntoComplianceError for HttpError {
    fn into_compliance(self) -> ComplianceError {
        // Timeouts carry the configured duration and are mapped by the client.
        if self.is_timeout() {
            return ComplianceError::Network(format!("HTTP request timed out: {self}"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return ComplianceError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return ComplianceError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return ComplianceError::Serialization(format!("failed to read response body: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => ComplianceError::Auth(message),
                _ => ComplianceError::api(code, message, None),
            };
        }

        ComplianceError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_compliance())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → ComplianceError */
/* -------------------------------------------------------------------------- */

impl IntoComplianceError for UrlError {
    fn into_compliance(self) -> ComplianceError {
        ComplianceError::Config(format!("invalid URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_compliance())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
