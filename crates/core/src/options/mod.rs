//! Per-call options
//!
//! Every operation takes exactly one options value holding its path
//! parameters, query parameters, body payload and tracing ids. Required
//! fields are public so callers can build options with struct literals; the
//! `new` constructors take the required fields and `with_*` setters fill the
//! optional ones.
//!
//! Options are validated before any request is built. A blank required string
//! or an empty required list yields `ComplianceError::MissingField` and the
//! transport is never called. Identifiers that become path segments must
//! also not be `.` or `..`, which URL resolution would collapse into a
//! different resource; those yield `ComplianceError::InvalidInput`.

use compliance_domain::{ComplianceError, Result};

pub mod attachments;
pub mod control_libraries;
pub mod profiles;
pub mod scans;

pub use attachments::{
    CreateAttachmentOptions, DeleteProfileAttachmentOptions, GetAttachmentParameterByNameOptions,
    GetProfileAttachmentOptions, ListAccountAttachmentsOptions, ListAttachmentParametersOptions,
    ListAttachmentsOptions, ReplaceAttachmentParameterByNameOptions,
    ReplaceAttachmentParametersOptions, ReplaceProfileAttachmentOptions,
};
pub use control_libraries::{
    CreateCustomControlLibraryOptions, DeleteCustomControlLibraryOptions,
    GetControlLibraryOptions, ListControlLibrariesOptions, ReplaceCustomControlLibraryOptions,
};
pub use profiles::{
    CreateProfileOptions, DeleteCustomProfileOptions, GetProfileOptions,
    ListProfileParametersOptions, ListProfilesOptions, ReplaceProfileOptions,
    ReplaceProfileParametersOptions,
};
pub use scans::CreateScanOptions;

/// Local required-field check run before a request is built.
pub trait ValidateOptions {
    /// # Errors
    /// Returns `ComplianceError::MissingField` naming the first absent field.
    fn validate(&self) -> Result<()>;
}

/// Tracing ids carried by every options type.
pub trait TraceIds {
    /// Caller-supplied correlation id (`X-Correlation-ID`)
    fn transaction_id(&self) -> Option<&str>;
    /// Optional per-attempt request id (`X-Request-ID`)
    fn request_id(&self) -> Option<&str>;
}

/// Generates the tracing-id setters and the [`TraceIds`] impl for an options
/// type with `transaction_id` and `request_id` fields.
macro_rules! impl_trace_ids {
    ($($options:ident),+ $(,)?) => {
        $(
            impl $options {
                pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
                    self.transaction_id = Some(transaction_id.into());
                    self
                }

                pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
                    self.request_id = Some(request_id.into());
                    self
                }
            }

            impl $crate::options::TraceIds for $options {
                fn transaction_id(&self) -> Option<&str> {
                    self.transaction_id.as_deref()
                }

                fn request_id(&self) -> Option<&str> {
                    self.request_id.as_deref()
                }
            }
        )+
    };
}

pub(crate) use impl_trace_ids;

pub(crate) fn require(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ComplianceError::MissingField(field));
    }
    Ok(())
}

/// [`require`] for identifiers placed in the request path.
pub(crate) fn require_segment(value: &str, field: &'static str) -> Result<()> {
    require(value, field)?;
    if matches!(value, "." | "..") {
        return Err(ComplianceError::InvalidInput(format!("{field} cannot be `{value}`")));
    }
    Ok(())
}

pub(crate) fn require_items<T>(items: &[T], field: &'static str) -> Result<()> {
    if items.is_empty() {
        return Err(ComplianceError::MissingField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use compliance_domain::ErrorCategory;

    use super::*;

    #[test]
    fn test_require_rejects_blank() {
        assert!(require("inst-1", "instance_id").is_ok());
        assert!(matches!(
            require("", "instance_id"),
            Err(ComplianceError::MissingField("instance_id"))
        ));
        assert!(matches!(
            require("   ", "profile_id"),
            Err(ComplianceError::MissingField("profile_id"))
        ));
    }

    #[test]
    fn test_require_segment_rejects_dot_segments() {
        assert!(require_segment("prof-1", "profile_id").is_ok());
        assert!(require_segment("v1.2", "profile_id").is_ok());
        assert!(require_segment("...", "profile_id").is_ok());
        assert!(matches!(
            require_segment(" ", "profile_id"),
            Err(ComplianceError::MissingField("profile_id"))
        ));

        for dots in [".", ".."] {
            let err = require_segment(dots, "attachment_id").unwrap_err();
            assert!(matches!(
                &err,
                ComplianceError::InvalidInput(msg) if msg.contains("attachment_id")
            ));
            assert_eq!(err.category(), ErrorCategory::Validation);
        }
    }

    #[test]
    fn test_require_items_rejects_empty() {
        assert!(require_items(&[1], "controls").is_ok());
        assert!(matches!(
            require_items::<u8>(&[], "controls"),
            Err(ComplianceError::MissingField("controls"))
        ));
    }
}
