//! Options for the control library operations

use compliance_domain::{ControlLibraryPrototype, ControlLibraryType, Result};

use super::{impl_trace_ids, require, require_items, require_segment, ValidateOptions};

fn validate_prototype(library: &ControlLibraryPrototype) -> Result<()> {
    require(&library.control_library_name, "control_library_name")?;
    require(&library.control_library_description, "control_library_description")?;
    require_items(&library.controls, "controls")?;
    for control in &library.controls {
        require(&control.control_name, "controls[].control_name")?;
    }
    Ok(())
}

/// `POST /control_libraries`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCustomControlLibraryOptions {
    pub instance_id: String,
    pub library: ControlLibraryPrototype,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl CreateCustomControlLibraryOptions {
    pub fn new(instance_id: impl Into<String>, library: ControlLibraryPrototype) -> Self {
        Self { instance_id: instance_id.into(), library, transaction_id: None, request_id: None }
    }
}

impl ValidateOptions for CreateCustomControlLibraryOptions {
    fn validate(&self) -> Result<()> {
        require_segment(&self.instance_id, "instance_id")?;
        validate_prototype(&self.library)
    }
}

/// `GET /control_libraries`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListControlLibrariesOptions {
    pub instance_id: String,
    pub limit: Option<u32>,
    /// Page cursor from a previous response's `next.start`
    pub start: Option<String>,
    pub control_library_type: Option<ControlLibraryType>,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl ListControlLibrariesOptions {
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

    pub fn with_type(mut self, library_type: ControlLibraryType) -> Self {
        self.control_library_type = Some(library_type);
        self
    }
}

impl ValidateOptions for ListControlLibrariesOptions {
    fn validate(&self) -> Result<()> {
        require_segment(&self.instance_id, "instance_id")
    }
}

/// `GET /control_libraries/{control_library_id}`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetControlLibraryOptions {
    pub instance_id: String,
    pub control_library_id: String,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl GetControlLibraryOptions {
    pub fn new(instance_id: impl Into<String>, control_library_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            control_library_id: control_library_id.into(),
            ..Self::default()
        }
    }
}

impl ValidateOptions for GetControlLibraryOptions {
    fn validate(&self) -> Result<()> {
        require_segment(&self.instance_id, "instance_id")?;
        require_segment(&self.control_library_id, "control_library_id")
    }
}

/// `PUT /control_libraries/{control_library_id}`
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceCustomControlLibraryOptions {
    pub instance_id: String,
    pub control_library_id: String,
    pub library: ControlLibraryPrototype,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl ReplaceCustomControlLibraryOptions {
    pub fn new(
        instance_id: impl Into<String>,
        control_library_id: impl Into<String>,
        library: ControlLibraryPrototype,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            control_library_id: control_library_id.into(),
            library,
            transaction_id: None,
            request_id: None,
        }
    }
}

impl ValidateOptions for ReplaceCustomControlLibraryOptions {
    fn validate(&self) -> Result<()> {
        require_segment(&self.instance_id, "instance_id")?;
        require_segment(&self.control_library_id, "control_library_id")?;
        validate_prototype(&self.library)
    }
}

/// `DELETE /control_libraries/{control_library_id}`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteCustomControlLibraryOptions {
    pub instance_id: String,
    pub control_library_id: String,
    pub transaction_id: Option<String>,
    pub request_id: Option<String>,
}

impl DeleteCustomControlLibraryOptions {
    pub fn new(instance_id: impl Into<String>, control_library_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            control_library_id: control_library_id.into(),
            ..Self::default()
        }
    }
}

impl ValidateOptions for DeleteCustomControlLibraryOptions {
    fn validate(&self) -> Result<()> {
        require_segment(&self.instance_id, "instance_id")?;
        require_segment(&self.control_library_id, "control_library_id")
    }
}

impl_trace_ids!(
    CreateCustomControlLibraryOptions,
    ListControlLibrariesOptions,
    GetControlLibraryOptions,
    ReplaceCustomControlLibraryOptions,
    DeleteCustomControlLibraryOptions,
);
