//! Options for the attachment and attachment parameter operations

use compliance_domain::{AttachmentPrototype, ParameterInfo, Result};

use super::{impl_trace_ids, require, require_items, require_segment, ValidateOptions};

fn validate_prototype(attachment: &AttachmentPrototype) -> Result<()> {
    require(&attachment.name, "attachments[].name")?;
    require_items(&attachment.scope, "attachments[].scope")?;
    for scope in attachment.scope.iter().chain(&attachment.exclusions) {
        require(&scope.environment, "attachments[].scope[].environment")?;
    }
    validate_parameters(&attachment.attachment_parameters)
}

fn validate_parameters(parameters: &[ParameterInfo]) -> Result<()> {
    for parameter in parameters {
        require(&parameter.parameter_name, "attachment_parameters[].parameter_name")?;
    }
    Ok(())
}

fn require_attachment_path(instance_id: &str, profile_id: &str, attachment_id: &str) -> Result<()> {
    require_segment(instance_id, "instance_id")?;
    require_segment(profile_id, "profile_id")?;
    require_segment(attachment_id, "attachment_id")
}

/// `POST /profiles/{profile_id}/attachments`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateAttachmentOptions {
    pub instance_id: String,
    pub profile_id: String,
    pub attachments: Vec<AttachmentPrototype>,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl CreateAttachmentOptions {
    pub fn new(
        instance_id: impl Into<String>,
        profile_id: impl Into<String>,
        attachments: Vec<AttachmentPrototype>,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            profile_id: profile_id.into(),
            attachments,
            ..Self::default()
        }
    }
}

impl ValidateOptions for CreateAttachmentOptions {
    fn validate(&self) -> Result<()> {
        require_segment(&self.instance_id, "instance_id")?;
        require_segment(&self.profile_id, "profile_id")?;
        require_items(&self.attachments, "attachments")?;
        self.attachments.iter().try_for_each(validate_prototype)
    }
}

/// `GET /profiles/{profile_id}/attachments`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListAttachmentsOptions {
    pub instance_id: String,
    pub profile_id: String,
    pub limit: Option<u32>,
    pub start: Option<String>,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl ListAttachmentsOptions {
    pub fn new(instance_id: impl Into<String>, profile_id: impl Into<String>) -> Self {
        Self { instance_id: instance_id.into(), profile_id: profile_id.into(), ..Self::default() }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }
}

impl ValidateOptions for ListAttachmentsOptions {
    fn validate(&self) -> Result<()> {
        require_segment(&self.instance_id, "instance_id")?;
        require_segment(&self.profile_id, "profile_id")
    }
}

/// `GET /attachments`: every attachment in the instance, optionally filtered
/// by account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListAccountAttachmentsOptions {
    pub instance_id: String,
    pub account_id: Option<String>,
    pub limit: Option<u32>,
    pub start: Option<String>,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl ListAccountAttachmentsOptions {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self { instance_id: instance_id.into(), ..Self::default() }
    }

    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }
}

impl ValidateOptions for ListAccountAttachmentsOptions {
    fn validate(&self) -> Result<()> {
        require_segment(&self.instance_id, "instance_id")
    }
}

/// `GET /profiles/{profile_id}/attachments/{attachment_id}`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetProfileAttachmentOptions {
    pub instance_id: String,
    pub profile_id: String,
    pub attachment_id: String,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl GetProfileAttachmentOptions {
    pub fn new(
        instance_id: impl Into<String>,
        profile_id: impl Into<String>,
        attachment_id: impl Into<String>,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            profile_id: profile_id.into(),
            attachment_id: attachment_id.into(),
            ..Self::default()
        }
    }
}

impl ValidateOptions for GetProfileAttachmentOptions {
    fn validate(&self) -> Result<()> {
        require_attachment_path(&self.instance_id, &self.profile_id, &self.attachment_id)
    }
}

/// `PUT /profiles/{profile_id}/attachments/{attachment_id}`
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceProfileAttachmentOptions {
    pub instance_id: String,
    pub profile_id: String,
    pub attachment_id: String,
    pub attachment: AttachmentPrototype,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl ReplaceProfileAttachmentOptions {
    pub fn new(
        instance_id: impl Into<String>,
        profile_id: impl Into<String>,
        attachment_id: impl Into<String>,
        attachment: AttachmentPrototype,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            profile_id: profile_id.into(),
            attachment_id: attachment_id.into(),
            attachment,
            transaction_id: None,
            request_id: None,
        }
    }
}

impl ValidateOptions for ReplaceProfileAttachmentOptions {
    fn validate(&self) -> Result<()> {
        require_attachment_path(&self.instance_id, &self.profile_id, &self.attachment_id)?;
        validate_prototype(&self.attachment)
    }
}

/// `DELETE /profiles/{profile_id}/attachments/{attachment_id}`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteProfileAttachmentOptions {
    pub instance_id: String,
    pub profile_id: String,
    pub attachment_id: String,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl DeleteProfileAttachmentOptions {
    pub fn new(
        instance_id: impl Into<String>,
        profile_id: impl Into<String>,
        attachment_id: impl Into<String>,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            profile_id: profile_id.into(),
            attachment_id: attachment_id.into(),
            ..Self::default()
        }
    }
}

impl ValidateOptions for DeleteProfileAttachmentOptions {
    fn validate(&self) -> Result<()> {
        require_attachment_path(&self.instance_id, &self.profile_id, &self.attachment_id)
    }
}

/// `GET /profiles/{profile_id}/attachments/{attachment_id}/parameters`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListAttachmentParametersOptions {
    pub instance_id: String,
    pub profile_id: String,
    pub attachment_id: String,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl ListAttachmentParametersOptions {
    pub fn new(
        instance_id: impl Into<String>,
        profile_id: impl Into<String>,
        attachment_id: impl Into<String>,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            profile_id: profile_id.into(),
            attachment_id: attachment_id.into(),
            ..Self::default()
        }
    }
}

impl ValidateOptions for ListAttachmentParametersOptions {
    fn validate(&self) -> Result<()> {
        require_attachment_path(&self.instance_id, &self.profile_id, &self.attachment_id)
    }
}

/// `PUT /profiles/{profile_id}/attachments/{attachment_id}/parameters`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplaceAttachmentParametersOptions {
    pub instance_id: String,
    pub profile_id: String,
    pub attachment_id: String,
    pub attachment_parameters: Vec<ParameterInfo>,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl ReplaceAttachmentParametersOptions {
    pub fn new(
        instance_id: impl Into<String>,
        profile_id: impl Into<String>,
        attachment_id: impl Into<String>,
        attachment_parameters: Vec<ParameterInfo>,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            profile_id: profile_id.into(),
            attachment_id: attachment_id.into(),
            attachment_parameters,
            ..Self::default()
        }
    }
}

impl ValidateOptions for ReplaceAttachmentParametersOptions {
    fn validate(&self) -> Result<()> {
        require_attachment_path(&self.instance_id, &self.profile_id, &self.attachment_id)?;
        require_items(&self.attachment_parameters, "attachment_parameters")?;
        validate_parameters(&self.attachment_parameters)
    }
}

/// `GET /profiles/{profile_id}/attachments/{attachment_id}/parameters/{parameter_name}`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetAttachmentParameterByNameOptions {
    pub instance_id: String,
    pub profile_id: String,
    pub attachment_id: String,
    pub parameter_name: String,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl GetAttachmentParameterByNameOptions {
    pub fn new(
        instance_id: impl Into<String>,
        profile_id: impl Into<String>,
        attachment_id: impl Into<String>,
        parameter_name: impl Into<String>,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            profile_id: profile_id.into(),
            attachment_id: attachment_id.into(),
            parameter_name: parameter_name.into(),
            ..Self::default()
        }
    }
}

impl ValidateOptions for GetAttachmentParameterByNameOptions {
    fn validate(&self) -> Result<()> {
        require_attachment_path(&self.instance_id, &self.profile_id, &self.attachment_id)?;
        require_segment(&self.parameter_name, "parameter_name")
    }
}

/// `PUT /profiles/{profile_id}/attachments/{attachment_id}/parameters/{parameter_name}`
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceAttachmentParameterByNameOptions {
    pub instance_id: String,
    pub profile_id: String,
    pub attachment_id: String,
    pub parameter_name: String,
    pub parameter: ParameterInfo,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl ReplaceAttachmentParameterByNameOptions {
    pub fn new(
        instance_id: impl Into<String>,
        profile_id: impl Into<String>,
        attachment_id: impl Into<String>,
        parameter_name: impl Into<String>,
        parameter: ParameterInfo,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            profile_id: profile_id.into(),
            attachment_id: attachment_id.into(),
            parameter_name: parameter_name.into(),
            parameter,
            transaction_id: None,
            request_id: None,
        }
    }
}

impl ValidateOptions for ReplaceAttachmentParameterByNameOptions {
    fn validate(&self) -> Result<()> {
        require_attachment_path(&self.instance_id, &self.profile_id, &self.attachment_id)?;
        require_segment(&self.parameter_name, "parameter_name")?;
        require(&self.parameter.parameter_name, "parameter.parameter_name")
    }
}

impl_trace_ids!(
    CreateAttachmentOptions,
    ListAttachmentsOptions,
    ListAccountAttachmentsOptions,
    GetProfileAttachmentOptions,
    ReplaceProfileAttachmentOptions,
    DeleteProfileAttachmentOptions,
    ListAttachmentParametersOptions,
    ReplaceAttachmentParametersOptions,
    GetAttachmentParameterByNameOptions,
    ReplaceAttachmentParameterByNameOptions,
);
