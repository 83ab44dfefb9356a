//! Endpoint wrapper service
//!
//! [`ComplianceService`] turns one options value into one [`ApiRequest`],
//! sends it through the injected [`Transport`] and decodes the answer into a
//! [`DetailedResponse`]. Operations are grouped by resource family in the
//! submodules.

use std::sync::Arc;

use compliance_domain::constants::{HEADER_CORRELATION_ID, HEADER_REQUEST_ID};
use compliance_domain::{ComplianceError, DetailedResponse, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::options::{TraceIds, ValidateOptions};
use crate::transport::{ApiRequest, HttpMethod, RawResponse, Transport};

mod attachments;
mod control_libraries;
mod profiles;
mod scans;

/// Typed client for the compliance-management API
///
/// Holds only the shared transport, so clones are cheap and a single value can
/// serve concurrent calls.
pub struct ComplianceService<T: Transport> {
    transport: Arc<T>,
}

impl<T: Transport> Clone for ComplianceService<T> {
    fn clone(&self) -> Self {
        Self { transport: Arc::clone(&self.transport) }
    }
}

impl<T: Transport> std::fmt::Debug for ComplianceService<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplianceService").finish_non_exhaustive()
    }
}

impl<T: Transport> ComplianceService<T> {
    pub fn new(transport: T) -> Self {
        Self { transport: Arc::new(transport) }
    }

    pub fn from_arc(transport: Arc<T>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Send a built request and decode the body.
    async fn execute<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<DetailedResponse<R>> {
        debug!(method = %request.method, path = %request.path, "dispatching request");
        let response = self.transport.send(request).await?;
        decode(response)
    }

    /// Like [`Self::execute`], for deletes: the status is what counts, so a
    /// 2xx body that does not fit `R` yields `result: None`.
    async fn execute_delete<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<DetailedResponse<R>> {
        debug!(method = %request.method, path = %request.path, "dispatching request");
        let response = self.transport.send(request).await?;
        Ok(decode_lenient(response))
    }
}

/// Validate the options and start a request carrying the tracing headers.
///
/// A missing transaction id is replaced with a fresh UUID v4.
fn prepare<O>(options: &O, method: HttpMethod, path: String) -> Result<ApiRequest>
where
    O: ValidateOptions + TraceIds,
{
    options.validate()?;

    let transaction_id = options
        .transaction_id()
        .filter(|id| !id.trim().is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_string);

    let mut request = ApiRequest::new(method, path).header(HEADER_CORRELATION_ID, transaction_id);
    if let Some(request_id) = options.request_id() {
        request = request.header(HEADER_REQUEST_ID, request_id);
    }
    Ok(request)
}

fn to_body<B: Serialize>(body: &B) -> Result<Value> {
    serde_json::to_value(body)
        .map_err(|e| ComplianceError::Serialization(format!("failed to encode request body: {e}")))
}

fn decode<R: DeserializeOwned>(response: RawResponse) -> Result<DetailedResponse<R>> {
    let RawResponse { status_code, headers, body } = response;
    let result = match body {
        None | Some(Value::Null) => None,
        Some(value) => Some(serde_json::from_value(value).map_err(|e| {
            ComplianceError::Serialization(format!(
                "failed to decode response body (status {status_code}): {e}"
            ))
        })?),
    };
    Ok(DetailedResponse { status_code, headers, result })
}

fn decode_lenient<R: DeserializeOwned>(response: RawResponse) -> DetailedResponse<R> {
    let RawResponse { status_code, headers, body } = response;
    let result = body.and_then(|value| match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            debug!(status_code, error = %e, "delete response body ignored");
            None
        }
    });
    DetailedResponse { status_code, headers, result }
}
