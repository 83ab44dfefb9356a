//! Request and response shapes of the compliance API

pub mod attachment;
pub mod common;
pub mod control_library;
pub mod parameter;
pub mod profile;
pub mod response;
pub mod scan;

pub use attachment::{
    Attachment, AttachmentCollection, AttachmentCreated, AttachmentNotifications,
    AttachmentPrototype, AttachmentsPrototype, FailedControls, LastScan, MultiCloudScope,
    ScanSchedule,
};
pub use common::{EnablementStatus, PageInfo, PageLink, PropertyItem};
pub use control_library::{
    Assessment, Control, ControlDocs, ControlLibrary, ControlLibraryCollection,
    ControlLibraryDelete, ControlLibraryPrototype, ControlLibraryType, ControlSpecification,
};
pub use parameter::{
    AttachmentParameterCollection, DefaultParameter, ParameterInfo, ParameterType,
    ProfileParameterCollection,
};
pub use profile::{
    Profile, ProfileCollection, ProfileControl, ProfileControlPrototype, ProfilePrototype,
    ProfileType,
};
pub use response::DetailedResponse;
pub use scan::{Scan, ScanPrototype};
