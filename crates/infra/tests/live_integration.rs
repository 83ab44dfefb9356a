//! Live-service suite
//!
//! Runs every operation against a real deployment. Skipped unless
//! `COMPLIANCE_CONFIG_FILE` or the `COMPLIANCE_*` variables describe one, and
//! the configuration names an instance and an account.
//!
//! Resources created here are deleted at the end of the run.

mod support;

use compliance_core::options::{
    CreateAttachmentOptions, CreateCustomControlLibraryOptions, CreateProfileOptions,
    CreateScanOptions, DeleteCustomControlLibraryOptions, DeleteCustomProfileOptions,
    DeleteProfileAttachmentOptions, GetAttachmentParameterByNameOptions,
    GetControlLibraryOptions, GetProfileAttachmentOptions, GetProfileOptions,
    ListAccountAttachmentsOptions, ListAttachmentParametersOptions, ListAttachmentsOptions,
    ListControlLibrariesOptions, ListProfileParametersOptions, ListProfilesOptions,
    ReplaceAttachmentParameterByNameOptions, ReplaceAttachmentParametersOptions,
    ReplaceCustomControlLibraryOptions, ReplaceProfileAttachmentOptions, ReplaceProfileOptions,
    ReplaceProfileParametersOptions,
};
use compliance_domain::{
    AttachmentPrototype, Control, ControlLibraryPrototype, ControlLibraryType, ControlSpecification,
    EnablementStatus, MultiCloudScope, ProfileControlPrototype, ProfilePrototype, ProfileType,
    ScanSchedule,
};
use compliance_infra::build_service;

fn library_prototype(description: &str) -> ControlLibraryPrototype {
    ControlLibraryPrototype {
        control_library_name: "rust-sdk-live-library".into(),
        control_library_description: description.into(),
        control_library_type: ControlLibraryType::Custom,
        control_library_version: Some("1.0.0".into()),
        version_group_label: None,
        latest: Some(true),
        controls: vec![Control {
            control_name: "SC-7".into(),
            control_description: Some("Boundary Protection".into()),
            control_category: Some("System and Communications Protection".into()),
            control_requirement: Some(true),
            status: Some(EnablementStatus::Enabled),
            control_specifications: vec![ControlSpecification {
                component_id: Some("iam-identity".into()),
                environment: Some("ibm-cloud".into()),
                control_specification_description: Some("IBM cloud".into()),
                ..ControlSpecification::default()
            }],
            ..Control::default()
        }],
    }
}

fn profile_prototype(library_id: &str, control_id: &str, version: &str) -> ProfilePrototype {
    ProfilePrototype {
        profile_name: "rust-sdk-live-profile".into(),
        profile_description: Some("created by the live suite".into()),
        profile_type: ProfileType::Custom,
        profile_version: Some(version.into()),
        latest: Some(true),
        version_group_label: None,
        controls: vec![ProfileControlPrototype::new(library_id, control_id)],
        default_parameters: Vec::new(),
    }
}

#[tokio::test]
async fn every_operation_against_live_service() {
    support::init_tracing();

    let Some(config) = support::live_config() else {
        eprintln!("skipping live suite: no COMPLIANCE_CONFIG_FILE or COMPLIANCE_* configuration");
        return;
    };
    let (Some(instance), Some(account)) = (config.instance_id.clone(), config.account_id.clone())
    else {
        eprintln!("skipping live suite: instance_id and account_id are required");
        return;
    };

    let service = build_service(&config).expect("service should build");

    // Control libraries
    let libraries = service
        .list_control_libraries(&ListControlLibrariesOptions::new(&instance).with_limit(10))
        .await
        .expect("list control libraries");
    assert_eq!(libraries.status_code, 200);

    let library = service
        .create_custom_control_library(&CreateCustomControlLibraryOptions::new(
            &instance,
            library_prototype("live suite library"),
        ))
        .await
        .expect("create control library")
        .result
        .expect("library body");
    let library_id = library.id.clone().expect("library id");

    let fetched = service
        .get_control_library(&GetControlLibraryOptions::new(&instance, &library_id))
        .await
        .expect("get control library")
        .result
        .expect("library body");
    let control_id = fetched
        .controls
        .first()
        .and_then(|c| c.control_id.clone())
        .expect("stored control id");

    service
        .replace_custom_control_library(&ReplaceCustomControlLibraryOptions::new(
            &instance,
            &library_id,
            library_prototype("live suite library, replaced"),
        ))
        .await
        .expect("replace control library");

    // Profiles
    let profile = service
        .create_profile(&CreateProfileOptions::new(
            &instance,
            profile_prototype(&library_id, &control_id, "1.0.0"),
        ))
        .await
        .expect("create profile")
        .result
        .expect("profile body");
    let profile_id = profile.id.clone().expect("profile id");

    let profiles = service
        .list_profiles(&ListProfilesOptions::new(&instance).with_type(ProfileType::Custom))
        .await
        .expect("list profiles");
    assert!(profiles.result.is_some());

    service
        .get_profile(&GetProfileOptions::new(&instance, &profile_id))
        .await
        .expect("get profile");
    service
        .replace_profile(&ReplaceProfileOptions::new(
            &instance,
            &profile_id,
            profile_prototype(&library_id, &control_id, "1.0.1"),
        ))
        .await
        .expect("replace profile");

    let defaults = service
        .list_profile_parameters(&ListProfileParametersOptions::new(&instance, &profile_id))
        .await
        .expect("list profile parameters")
        .result
        .unwrap_or_default()
        .default_parameters;
    if !defaults.is_empty() {
        service
            .replace_profile_parameters(&ReplaceProfileParametersOptions::new(
                &instance,
                &profile_id,
                defaults,
            ))
            .await
            .expect("replace profile parameters");
    }

    // Attachments
    let scope = MultiCloudScope::new("ibm-cloud")
        .with_property("scope_id", &account)
        .with_property("scope_type", "account");
    let attachment = AttachmentPrototype::new(
        "rust-sdk-live-attachment",
        vec![scope],
        EnablementStatus::Disabled,
        ScanSchedule::Every30Days,
    );

    let created = service
        .create_attachment(&CreateAttachmentOptions::new(
            &instance,
            &profile_id,
            vec![attachment.clone()],
        ))
        .await
        .expect("create attachment")
        .result
        .expect("attachment body");
    let attachment_id = created
        .attachments
        .first()
        .and_then(|a| a.id.clone())
        .expect("attachment id");

    service
        .list_attachments(&ListAttachmentsOptions::new(&instance, &profile_id))
        .await
        .expect("list attachments");
    service
        .list_account_attachments(
            &ListAccountAttachmentsOptions::new(&instance).with_account_id(&account),
        )
        .await
        .expect("list account attachments");
    service
        .get_profile_attachment(&GetProfileAttachmentOptions::new(
            &instance,
            &profile_id,
            &attachment_id,
        ))
        .await
        .expect("get attachment");
    service
        .replace_profile_attachment(&ReplaceProfileAttachmentOptions::new(
            &instance,
            &profile_id,
            &attachment_id,
            attachment.with_description("replaced by the live suite"),
        ))
        .await
        .expect("replace attachment");

    let parameters = service
        .list_attachment_parameters(&ListAttachmentParametersOptions::new(
            &instance,
            &profile_id,
            &attachment_id,
        ))
        .await
        .expect("list attachment parameters")
        .result
        .unwrap_or_default()
        .attachment_parameters;

    if let Some(first) = parameters.first().cloned() {
        service
            .replace_attachment_parameters(&ReplaceAttachmentParametersOptions::new(
                &instance,
                &profile_id,
                &attachment_id,
                parameters.clone(),
            ))
            .await
            .expect("replace attachment parameters");
        service
            .get_attachment_parameter_by_name(&GetAttachmentParameterByNameOptions::new(
                &instance,
                &profile_id,
                &attachment_id,
                &first.parameter_name,
            ))
            .await
            .expect("get attachment parameter");
        service
            .replace_attachment_parameter_by_name(&ReplaceAttachmentParameterByNameOptions::new(
                &instance,
                &profile_id,
                &attachment_id,
                first.parameter_name.clone(),
                first,
            ))
            .await
            .expect("replace attachment parameter");
    }

    // Scans
    let scan = service
        .create_scan(&CreateScanOptions::new(&instance, &attachment_id))
        .await
        .expect("create scan");
    assert!(scan.is_success());

    // Cleanup in reverse order
    service
        .delete_profile_attachment(&DeleteProfileAttachmentOptions::new(
            &instance,
            &profile_id,
            &attachment_id,
        ))
        .await
        .expect("delete attachment");
    service
        .delete_custom_profile(&DeleteCustomProfileOptions::new(&instance, &profile_id))
        .await
        .expect("delete profile");
    service
        .delete_custom_control_library(&DeleteCustomControlLibraryOptions::new(
            &instance,
            &library_id,
        ))
        .await
        .expect("delete control library");
}
