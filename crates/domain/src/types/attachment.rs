//! Attachment types
//!
//! An attachment binds a profile to an account scope, overrides some of the
//! profile's default parameters and schedules scans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{EnablementStatus, PageInfo, PropertyItem};
use super::parameter::ParameterInfo;
use crate::impl_wire_enum_conversions;

/// How often an attachment is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanSchedule {
    Daily,
    Every7Days,
    Every30Days,
}

impl_wire_enum_conversions!(ScanSchedule {
    Daily => "daily",
    Every7Days => "every_7_days",
    Every30Days => "every_30_days",
});

/// Resources an attachment evaluates, identified by environment + properties
/// (typically `scope_id` and `scope_type`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiCloudScope {
    pub environment: String,
    #[serde(default)]
    pub properties: Vec<PropertyItem>,
}

impl MultiCloudScope {
    pub fn new(environment: impl Into<String>) -> Self {
        Self { environment: environment.into(), properties: Vec::new() }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(PropertyItem::new(name, value));
        self
    }

    /// Value of a named property, if present.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.iter().find(|p| p.name == name).map(|p| p.value.as_str())
    }
}

/// Failure notification settings of an attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentNotifications {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls: Option<FailedControls>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedControls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_limit: Option<u32>,
    #[serde(default)]
    pub failed_control_ids: Vec<String>,
}

/// Summary of the most recent scan of an attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastScan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

/// Attachment as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub scope: Vec<MultiCloudScope>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<MultiCloudScope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EnablementStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScanSchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<AttachmentNotifications>,
    #[serde(default)]
    pub attachment_parameters: Vec<ParameterInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_scan: Option<LastScan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_scan_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,
}

/// One attachment to create, or the body of an attachment replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentPrototype {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub scope: Vec<MultiCloudScope>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<MultiCloudScope>,
    pub status: EnablementStatus,
    pub schedule: ScanSchedule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<AttachmentNotifications>,
    #[serde(default)]
    pub attachment_parameters: Vec<ParameterInfo>,
}

impl AttachmentPrototype {
    pub fn new(
        name: impl Into<String>,
        scope: Vec<MultiCloudScope>,
        status: EnablementStatus,
        schedule: ScanSchedule,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            scope,
            exclusions: Vec::new(),
            status,
            schedule,
            notifications: None,
            attachment_parameters: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_exclusion(mut self, scope: MultiCloudScope) -> Self {
        self.exclusions.push(scope);
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterInfo) -> Self {
        self.attachment_parameters.push(parameter);
        self
    }

    pub fn with_notifications(mut self, notifications: AttachmentNotifications) -> Self {
        self.notifications = Some(notifications);
        self
    }
}

/// Request body of a create: one or more attachments for a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentsPrototype {
    pub attachments: Vec<AttachmentPrototype>,
}

/// Response of a create: the profile id plus the stored attachments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentCreated {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Page of attachments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentCollection {
    #[serde(flatten)]
    pub page: PageInfo,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}
