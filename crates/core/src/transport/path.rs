//! Resource path construction

use compliance_domain::constants::API_VERSION;
use urlencoding::encode;

/// Builds `/instances/{instance_id}/v3/...` paths with each dynamic segment
/// percent-encoded.
#[derive(Debug, Clone)]
pub struct ResourcePath {
    path: String,
}

impl ResourcePath {
    /// Start a path scoped to a service instance.
    pub fn instance(instance_id: &str) -> Self {
        Self { path: format!("/instances/{}/{}", encode(instance_id), API_VERSION) }
    }

    /// Append a fixed collection name (not encoded).
    pub fn collection(mut self, name: &'static str) -> Self {
        self.path.push('/');
        self.path.push_str(name);
        self
    }

    /// Append a caller-supplied identifier (encoded).
    pub fn id(mut self, value: &str) -> Self {
        self.path.push('/');
        self.path.push_str(&encode(value));
        self
    }

    pub fn build(self) -> String {
        self.path
    }
}
