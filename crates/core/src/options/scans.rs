//! Options for the scan operation

use compliance_domain::Result;

use super::{impl_trace_ids, require, require_segment, ValidateOptions};

/// `POST /scans`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateScanOptions {
    pub instance_id: String,
    pub attachment_id: String,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl CreateScanOptions {
    pub fn new(instance_id: impl Into<String>, attachment_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            attachment_id: attachment_id.into(),
            ..Self::default()
        }
    }
}

impl ValidateOptions for CreateScanOptions {
    fn validate(&self) -> Result<()> {
        require_segment(&self.instance_id, "instance_id")?;
        require(&self.attachment_id, "attachment_id")
    }
}

impl_trace_ids!(CreateScanOptions);
