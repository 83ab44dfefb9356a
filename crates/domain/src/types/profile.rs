//! Profile types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::PageInfo;
use super::parameter::DefaultParameter;
use crate::impl_wire_enum_conversions;

/// Who maintains a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileType {
    Predefined,
    Custom,
}

impl_wire_enum_conversions!(ProfileType {
    Predefined => "predefined",
    Custom => "custom",
});

/// Profile as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub profile_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_description: Option<String>,
    pub profile_type: ProfileType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_group_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    #[serde(default)]
    pub latest: bool,
    #[serde(default)]
    pub hierarchy_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_parents_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments_count: Option<u64>,
    #[serde(default)]
    pub controls: Vec<ProfileControl>,
    #[serde(default)]
    pub default_parameters: Vec<DefaultParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,
}

/// Control as listed inside a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileControl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_library_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_library_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_requirement: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_specifications_count: Option<u64>,
}

/// Reference to a library control, used when creating a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileControlPrototype {
    pub control_library_id: String,
    pub control_id: String,
}

impl ProfileControlPrototype {
    pub fn new(control_library_id: impl Into<String>, control_id: impl Into<String>) -> Self {
        Self { control_library_id: control_library_id.into(), control_id: control_id.into() }
    }
}

/// Request body for creating or replacing a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePrototype {
    pub profile_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_description: Option<String>,
    pub profile_type: ProfileType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_group_label: Option<String>,
    pub controls: Vec<ProfileControlPrototype>,
    #[serde(default)]
    pub default_parameters: Vec<DefaultParameter>,
}

/// Page of profiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileCollection {
    #[serde(flatten)]
    pub page: PageInfo,
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

impl ProfileCollection {
    /// Find a profile on this page by name and version.
    pub fn find(&self, profile_name: &str, profile_version: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| {
            p.profile_name == profile_name && p.profile_version.as_deref() == Some(profile_version)
        })
    }
}
