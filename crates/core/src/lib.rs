//! # Compliance Core
//!
//! Endpoint wrapper layer - no HTTP or configuration code.
//!
//! This crate contains:
//! - Per-call options types with local required-field validation
//! - The [`Transport`] port the wrapper sends requests through
//! - [`ComplianceService`], one method per API operation
//!
//! ## Architecture Principles
//! - Only depends on `compliance-domain`
//! - Exactly one transport call per successful operation, none on a
//!   validation failure
//! - No retries; the transport owns them

pub mod options;
pub mod service;
pub mod transport;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use options::{TraceIds, ValidateOptions};
pub use service::ComplianceService;
pub use transport::{ApiRequest, HttpMethod, RawResponse, ResourcePath, Transport};
