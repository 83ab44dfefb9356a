//! Shapes shared by several resource families.

use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;

/// Link to a page of a collection.
///
/// The client exposes these verbatim; following them is the caller's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub href: String,
    /// Cursor to pass back as the `start` query parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
}

/// Paging metadata carried by every collection response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<PageLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<PageLink>,
}

impl PageInfo {
    /// Cursor of the next page, when the service reported one.
    pub fn next_start(&self) -> Option<&str> {
        self.next.as_ref().and_then(|link| link.start.as_deref())
    }
}

/// Enabled/disabled switch used by controls and attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnablementStatus {
    Enabled,
    Disabled,
}

impl_wire_enum_conversions!(EnablementStatus {
    Enabled => "enabled",
    Disabled => "disabled",
});

/// Key/value pair used in scopes and control tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyItem {
    pub name: String,
    pub value: String,
}

impl PropertyItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}
