use compliance_domain::{DetailedResponse, Result, Scan, ScanPrototype};
use tracing::{info, instrument};

use super::{prepare, to_body, ComplianceService};
use crate::options::CreateScanOptions;
use crate::transport::{HttpMethod, ResourcePath, Transport};

impl<T: Transport> ComplianceService<T> {
    /// Trigger an on-demand scan of an attachment.
    #[instrument(
        skip(self, options),
        fields(instance_id = %options.instance_id, attachment_id = %options.attachment_id)
    )]
    pub async fn create_scan(&self, options: &CreateScanOptions) -> Result<DetailedResponse<Scan>> {
        let path = ResourcePath::instance(&options.instance_id).collection("scans").build();
        let body = ScanPrototype { attachment_id: options.attachment_id.clone() };
        let request = prepare(options, HttpMethod::Post, path)?.json(to_body(&body)?);

        let response: DetailedResponse<Scan> = self.execute(request).await?;
        info!(
            status = response.status_code,
            scan_id = response.result.as_ref().and_then(|s| s.id.as_deref()),
            "scan created"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use compliance_domain::ComplianceError;
    use serde_json::json;

    use super::*;
    use crate::testing::RecordingTransport;

    #[tokio::test]
    async fn test_create_scan() {
        let transport = Arc::new(RecordingTransport::new());
        let service = ComplianceService::from_arc(Arc::clone(&transport));
        transport.respond_json(
            201,
            json!({ "id": "scan-1", "attachment_id": "att-1", "status": "in_progress" }),
        );

        let response =
            service.create_scan(&CreateScanOptions::new("inst-1", "att-1")).await.unwrap();

        let scan = response.result.unwrap();
        assert_eq!(scan.id.as_deref(), Some("scan-1"));
        let request = transport.last_request().unwrap();
        assert_eq!(request.path, "/instances/inst-1/v3/scans");
        assert_eq!(request.body, Some(json!({ "attachment_id": "att-1" })));
    }

    #[tokio::test]
    async fn test_create_scan_requires_attachment() {
        let transport = Arc::new(RecordingTransport::new());
        let service = ComplianceService::from_arc(Arc::clone(&transport));

        let err = service.create_scan(&CreateScanOptions::new("inst-1", "")).await.unwrap_err();

        assert_eq!(err.category(), compliance_domain::ErrorCategory::Validation);
        assert!(matches!(err, ComplianceError::MissingField("attachment_id")));
        assert_eq!(transport.calls(), 0);
    }
}
