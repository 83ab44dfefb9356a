//! Options for the profile and profile parameter operations

use compliance_domain::{DefaultParameter, ProfilePrototype, ProfileType, Result};

use super::{impl_trace_ids, require, require_items, require_segment, ValidateOptions};

fn validate_prototype(profile: &ProfilePrototype) -> Result<()> {
    require(&profile.profile_name, "profile_name")?;
    require_items(&profile.controls, "controls")?;
    for control in &profile.controls {
        require(&control.control_library_id, "controls[].control_library_id")?;
        require(&control.control_id, "controls[].control_id")?;
    }
    validate_default_parameters(&profile.default_parameters)
}

fn validate_default_parameters(parameters: &[DefaultParameter]) -> Result<()> {
    for parameter in parameters {
        require(&parameter.parameter_name, "default_parameters[].parameter_name")?;
    }
    Ok(())
}

/// `POST /profiles`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProfileOptions {
    pub instance_id: String,
    pub profile: ProfilePrototype,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl CreateProfileOptions {
    pub fn new(instance_id: impl Into<String>, profile: ProfilePrototype) -> Self {
        Self { instance_id: instance_id.into(), profile, transaction_id: None, request_id: None }
    }
}

impl ValidateOptions for CreateProfileOptions {
    fn validate(&self) -> Result<()> {
        require_segment(&self.instance_id, "instance_id")?;
        validate_prototype(&self.profile)
    }
}

/// `GET /profiles`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListProfilesOptions {
    pub instance_id: String,
    pub limit: Option<u32>,
    pub start: Option<String>,
    pub profile_type: Option<ProfileType>,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl ListProfilesOptions {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self { instance_id: instance_id.into(), ..Self::default() }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn with_type(mut self, profile_type: ProfileType) -> Self {
        self.profile_type = Some(profile_type);
        self
    }
}

impl ValidateOptions for ListProfilesOptions {
    fn validate(&self) -> Result<()> {
        require_segment(&self.instance_id, "instance_id")
    }
}

/// `GET /profiles/{profile_id}`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetProfileOptions {
    pub instance_id: String,
    pub profile_id: String,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl GetProfileOptions {
    pub fn new(instance_id: impl Into<String>, profile_id: impl Into<String>) -> Self {
        Self { instance_id: instance_id.into(), profile_id: profile_id.into(), ..Self::default() }
    }
}

impl ValidateOptions for GetProfileOptions {
    fn validate(&self) -> Result<()> {
        require_segment(&self.instance_id, "instance_id")?;
        require_segment(&self.profile_id, "profile_id")
    }
}

/// `PUT /profiles/{profile_id}`
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceProfileOptions {
    pub instance_id: String,
    pub profile_id: String,
    pub profile: ProfilePrototype,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl ReplaceProfileOptions {
    pub fn new(
        instance_id: impl Into<String>,
        profile_id: impl Into<String>,
        profile: ProfilePrototype,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            profile_id: profile_id.into(),
            profile,
            transaction_id: None,
            request_id: None,
        }
    }
}

impl ValidateOptions for ReplaceProfileOptions {
    fn validate(&self) -> Result<()> {
        require_segment(&self.instance_id, "instance_id")?;
        require_segment(&self.profile_id, "profile_id")?;
        validate_prototype(&self.profile)
    }
}

/// `DELETE /profiles/{profile_id}`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteCustomProfileOptions {
    pub instance_id: String,
    pub profile_id: String,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl DeleteCustomProfileOptions {
    pub fn new(instance_id: impl Into<String>, profile_id: impl Into<String>) -> Self {
        Self { instance_id: instance_id.into(), profile_id: profile_id.into(), ..Self::default() }
    }
}

impl ValidateOptions for DeleteCustomProfileOptions {
    fn validate(&self) -> Result<()> {
        require_segment(&self.instance_id, "instance_id")?;
        require_segment(&self.profile_id, "profile_id")
    }
}

/// `GET /profiles/{profile_id}/parameters`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListProfileParametersOptions {
    pub instance_id: String,
    pub profile_id: String,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl ListProfileParametersOptions {
    pub fn new(instance_id: impl Into<String>, profile_id: impl Into<String>) -> Self {
        Self { instance_id: instance_id.into(), profile_id: profile_id.into(), ..Self::default() }
    }
}

impl ValidateOptions for ListProfileParametersOptions {
    fn validate(&self) -> Result<()> {
        require_segment(&self.instance_id, "instance_id")?;
        require_segment(&self.profile_id, "profile_id")
    }
}

/// `PUT /profiles/{profile_id}/parameters`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplaceProfileParametersOptions {
    pub instance_id: String,
    pub profile_id: String,
    pub default_parameters: Vec<DefaultParameter>,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl ReplaceProfileParametersOptions {
    pub fn new(
        instance_id: impl Into<String>,
        profile_id: impl Into<String>,
        default_parameters: Vec<DefaultParameter>,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            profile_id: profile_id.into(),
            default_parameters,
            ..Self::default()
        }
    }
}

impl ValidateOptions for ReplaceProfileParametersOptions {
    fn validate(&self) -> Result<()> {
        require_segment(&self.instance_id, "instance_id")?;
        require_segment(&self.profile_id, "profile_id")?;
        require_items(&self.default_parameters, "default_parameters")?;
        validate_default_parameters(&self.default_parameters)
    }
}

impl_trace_ids!(
    CreateProfileOptions,
    ListProfilesOptions,
    GetProfileOptions,
    ReplaceProfileOptions,
    DeleteCustomProfileOptions,
    ListProfileParametersOptions,
    ReplaceProfileParametersOptions,
);
