//! Control library types
//!
//! A control library groups compliance controls. Each control lists the
//! specifications (per component/environment) that implement it, and each
//! specification lists the assessments that evaluate it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{EnablementStatus, PageInfo};
use super::parameter::ParameterInfo;
use crate::impl_wire_enum_conversions;

/// Who maintains a control library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlLibraryType {
    Predefined,
    Custom,
}

impl_wire_enum_conversions!(ControlLibraryType {
    Predefined => "predefined",
    Custom => "custom",
});

/// Control library as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlLibrary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    pub control_library_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_library_description: Option<String>,
    pub control_library_type: ControlLibraryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_library_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_group_label: Option<String>,
    #[serde(default)]
    pub latest: bool,
    #[serde(default)]
    pub hierarchy_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_parents_count: Option<u64>,
    #[serde(default)]
    pub controls: Vec<Control>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,
}

/// Request body for creating or replacing a custom control library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlLibraryPrototype {
    pub control_library_name: String,
    pub control_library_description: String,
    pub control_library_type: ControlLibraryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_library_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_group_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest: Option<bool>,
    pub controls: Vec<Control>,
}

/// A single control and its implementing specifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub control_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_parent: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub control_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_requirement: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EnablementStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_docs: Option<ControlDocs>,
    #[serde(default)]
    pub control_specifications: Vec<ControlSpecification>,
}

/// Reference to external documentation of a control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlDocs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_docs_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_docs_type: Option<String>,
}

/// How one component, in one environment, implements a control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlSpecification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_specification_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_specification_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessments_count: Option<u64>,
    #[serde(default)]
    pub assessments: Vec<Assessment>,
}

/// Assessment implementation: the rule or check evaluating a specification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub assessment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterInfo>,
}

/// Page of control libraries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlLibraryCollection {
    #[serde(flatten)]
    pub page: PageInfo,
    #[serde(default)]
    pub control_libraries: Vec<ControlLibrary>,
}

/// Response of a control library delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlLibraryDelete {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<String>,
}
