//! Assessment parameters
//!
//! A parameter belongs to one assessment (type + id). Profiles carry default
//! values for them; attachments override those defaults per scope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::impl_wire_enum_conversions;

/// Declared type of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    String,
    Numeric,
    General,
    Boolean,
    StringList,
    IpList,
    Timestamp,
}

impl_wire_enum_conversions!(ParameterType {
    String => "string",
    Numeric => "numeric",
    General => "general",
    Boolean => "boolean",
    StringList => "string_list",
    IpList => "ip_list",
    Timestamp => "timestamp",
});

/// Parameter attached to an assessment, with its current value.
///
/// Used for attachment overrides and for the parameter list of an assessment
/// inside a control library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_id: Option<String>,
    pub parameter_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_type: Option<ParameterType>,
    /// String, number, bool or list depending on `parameter_type`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_value: Option<Value>,
}

impl ParameterInfo {
    pub fn new(parameter_name: impl Into<String>) -> Self {
        Self {
            assessment_type: None,
            assessment_id: None,
            parameter_name: parameter_name.into(),
            parameter_display_name: None,
            parameter_type: None,
            parameter_value: None,
        }
    }

    pub fn with_assessment(
        mut self,
        assessment_type: impl Into<String>,
        assessment_id: impl Into<String>,
    ) -> Self {
        self.assessment_type = Some(assessment_type.into());
        self.assessment_id = Some(assessment_id.into());
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.parameter_display_name = Some(display_name.into());
        self
    }

    pub fn with_type(mut self, parameter_type: ParameterType) -> Self {
        self.parameter_type = Some(parameter_type);
        self
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.parameter_value = Some(value.into());
        self
    }
}

/// Default value a profile assigns to an assessment parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultParameter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_id: Option<String>,
    pub parameter_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_type: Option<ParameterType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_default_value: Option<Value>,
}

impl DefaultParameter {
    pub fn new(parameter_name: impl Into<String>) -> Self {
        Self {
            assessment_type: None,
            assessment_id: None,
            parameter_name: parameter_name.into(),
            parameter_display_name: None,
            parameter_type: None,
            parameter_default_value: None,
        }
    }

    pub fn with_assessment(
        mut self,
        assessment_type: impl Into<String>,
        assessment_id: impl Into<String>,
    ) -> Self {
        self.assessment_type = Some(assessment_type.into());
        self.assessment_id = Some(assessment_id.into());
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.parameter_display_name = Some(display_name.into());
        self
    }

    pub fn with_type(mut self, parameter_type: ParameterType) -> Self {
        self.parameter_type = Some(parameter_type);
        self
    }

    pub fn with_default_value(mut self, value: impl Into<Value>) -> Self {
        self.parameter_default_value = Some(value.into());
        self
    }
}

/// Body and response of the profile parameter endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileParameterCollection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub default_parameters: Vec<DefaultParameter>,
}

/// Body and response of the attachment parameter list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentParameterCollection {
    #[serde(default)]
    pub attachment_parameters: Vec<ParameterInfo>,
}

impl AttachmentParameterCollection {
    /// Look up a parameter by its name.
    pub fn find(&self, parameter_name: &str) -> Option<&ParameterInfo> {
        self.attachment_parameters.iter().find(|p| p.parameter_name == parameter_name)
    }
}
