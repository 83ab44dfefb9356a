use compliance_domain::{
    Attachment, AttachmentCollection, AttachmentCreated, AttachmentParameterCollection,
    AttachmentsPrototype, DetailedResponse, ParameterInfo, Result,
};
use serde_json::json;
use tracing::{info, instrument};

use super::{prepare, to_body, ComplianceService};
use crate::options::{
    CreateAttachmentOptions, DeleteProfileAttachmentOptions, GetAttachmentParameterByNameOptions,
    GetProfileAttachmentOptions, ListAccountAttachmentsOptions, ListAttachmentParametersOptions,
    ListAttachmentsOptions, ReplaceAttachmentParameterByNameOptions,
    ReplaceAttachmentParametersOptions, ReplaceProfileAttachmentOptions,
};
use crate::transport::{HttpMethod, ResourcePath, Transport};

const PROFILES: &str = "profiles";
const ATTACHMENTS: &str = "attachments";
const PARAMETERS: &str = "parameters";

/// `/instances/{instance}/v3/profiles/{profile}/attachments`
fn profile_attachments(instance_id: &str, profile_id: &str) -> ResourcePath {
    ResourcePath::instance(instance_id).collection(PROFILES).id(profile_id).collection(ATTACHMENTS)
}

fn attachment_parameters(instance_id: &str, profile_id: &str, attachment_id: &str) -> ResourcePath {
    profile_attachments(instance_id, profile_id).id(attachment_id).collection(PARAMETERS)
}

impl<T: Transport> ComplianceService<T> {
    /// Attach a profile to one or more scopes.
    ///
    /// # Errors
    /// `MissingField` when no attachment is given, or one lacks a name or a
    /// scope.
    #[instrument(
        skip(self, options),
        fields(instance_id = %options.instance_id, profile_id = %options.profile_id)
    )]
    pub async fn create_attachment(
        &self,
        options: &CreateAttachmentOptions,
    ) -> Result<DetailedResponse<AttachmentCreated>> {
        let path = profile_attachments(&options.instance_id, &options.profile_id).build();
        let body = AttachmentsPrototype { attachments: options.attachments.clone() };
        let request = prepare(options, HttpMethod::Post, path)?.json(to_body(&body)?);

        let response: DetailedResponse<AttachmentCreated> = self.execute(request).await?;
        info!(
            status = response.status_code,
            count = response.result.as_ref().map_or(0, |c| c.attachments.len()),
            "attachments created"
        );
        Ok(response)
    }

    /// Attachments of one profile.
    #[instrument(
        skip(self, options),
        fields(instance_id = %options.instance_id, profile_id = %options.profile_id)
    )]
    pub async fn list_attachments(
        &self,
        options: &ListAttachmentsOptions,
    ) -> Result<DetailedResponse<AttachmentCollection>> {
        let path = profile_attachments(&options.instance_id, &options.profile_id).build();
        let request = prepare(options, HttpMethod::Get, path)?
            .query_opt("limit", options.limit)
            .query_opt("start", options.start.as_deref());

        let response: DetailedResponse<AttachmentCollection> = self.execute(request).await?;
        info!(
            status = response.status_code,
            count = response.result.as_ref().map_or(0, |c| c.attachments.len()),
            "attachments listed"
        );
        Ok(response)
    }

    /// Attachments across every profile of the instance.
    #[instrument(
        skip(self, options),
        fields(instance_id = %options.instance_id, account_id = ?options.account_id)
    )]
    pub async fn list_account_attachments(
        &self,
        options: &ListAccountAttachmentsOptions,
    ) -> Result<DetailedResponse<AttachmentCollection>> {
        let path = ResourcePath::instance(&options.instance_id).collection(ATTACHMENTS).build();
        let request = prepare(options, HttpMethod::Get, path)?
            .query_opt("account_id", options.account_id.as_deref())
            .query_opt("limit", options.limit)
            .query_opt("start", options.start.as_deref());

        let response: DetailedResponse<AttachmentCollection> = self.execute(request).await?;
        info!(
            status = response.status_code,
            count = response.result.as_ref().map_or(0, |c| c.attachments.len()),
            "account attachments listed"
        );
        Ok(response)
    }

    #[instrument(
        skip(self, options),
        fields(
            instance_id = %options.instance_id,
            profile_id = %options.profile_id,
            attachment_id = %options.attachment_id,
        )
    )]
    pub async fn get_profile_attachment(
        &self,
        options: &GetProfileAttachmentOptions,
    ) -> Result<DetailedResponse<Attachment>> {
        let path = profile_attachments(&options.instance_id, &options.profile_id)
            .id(&options.attachment_id)
            .build();
        let request = prepare(options, HttpMethod::Get, path)?;

        let response: DetailedResponse<Attachment> = self.execute(request).await?;
        info!(status = response.status_code, "attachment fetched");
        Ok(response)
    }

    #[instrument(
        skip(self, options),
        fields(
            instance_id = %options.instance_id,
            profile_id = %options.profile_id,
            attachment_id = %options.attachment_id,
        )
    )]
    pub async fn replace_profile_attachment(
        &self,
        options: &ReplaceProfileAttachmentOptions,
    ) -> Result<DetailedResponse<Attachment>> {
        let path = profile_attachments(&options.instance_id, &options.profile_id)
            .id(&options.attachment_id)
            .build();
        let request = prepare(options, HttpMethod::Put, path)?.json(to_body(&options.attachment)?);

        let response: DetailedResponse<Attachment> = self.execute(request).await?;
        info!(status = response.status_code, "attachment replaced");
        Ok(response)
    }

    #[instrument(
        skip(self, options),
        fields(
            instance_id = %options.instance_id,
            profile_id = %options.profile_id,
            attachment_id = %options.attachment_id,
        )
    )]
    pub async fn delete_profile_attachment(
        &self,
        options: &DeleteProfileAttachmentOptions,
    ) -> Result<DetailedResponse<Attachment>> {
        let path = profile_attachments(&options.instance_id, &options.profile_id)
            .id(&options.attachment_id)
            .build();
        let request = prepare(options, HttpMethod::Delete, path)?;

        let response: DetailedResponse<Attachment> = self.execute_delete(request).await?;
        info!(status = response.status_code, "attachment deleted");
        Ok(response)
    }

    /// Parameter overrides of an attachment.
    #[instrument(
        skip(self, options),
        fields(
            instance_id = %options.instance_id,
            profile_id = %options.profile_id,
            attachment_id = %options.attachment_id,
        )
    )]
    pub async fn list_attachment_parameters(
        &self,
        options: &ListAttachmentParametersOptions,
    ) -> Result<DetailedResponse<AttachmentParameterCollection>> {
        let path =
            attachment_parameters(&options.instance_id, &options.profile_id, &options.attachment_id)
                .build();
        let request = prepare(options, HttpMethod::Get, path)?;

        let response: DetailedResponse<AttachmentParameterCollection> =
            self.execute(request).await?;
        info!(
            status = response.status_code,
            count = response.result.as_ref().map_or(0, |c| c.attachment_parameters.len()),
            "attachment parameters listed"
        );
        Ok(response)
    }

    /// Replace the whole override set of an attachment.
    #[instrument(
        skip(self, options),
        fields(
            instance_id = %options.instance_id,
            profile_id = %options.profile_id,
            attachment_id = %options.attachment_id,
        )
    )]
    pub async fn replace_attachment_parameters(
        &self,
        options: &ReplaceAttachmentParametersOptions,
    ) -> Result<DetailedResponse<AttachmentParameterCollection>> {
        let path =
            attachment_parameters(&options.instance_id, &options.profile_id, &options.attachment_id)
                .build();
        let body = json!({ "attachment_parameters": to_body(&options.attachment_parameters)? });
        let request = prepare(options, HttpMethod::Put, path)?.json(body);

        let response: DetailedResponse<AttachmentParameterCollection> =
            self.execute(request).await?;
        info!(status = response.status_code, "attachment parameters replaced");
        Ok(response)
    }

    #[instrument(
        skip(self, options),
        fields(
            instance_id = %options.instance_id,
            attachment_id = %options.attachment_id,
            parameter_name = %options.parameter_name,
        )
    )]
    pub async fn get_attachment_parameter_by_name(
        &self,
        options: &GetAttachmentParameterByNameOptions,
    ) -> Result<DetailedResponse<ParameterInfo>> {
        let path =
            attachment_parameters(&options.instance_id, &options.profile_id, &options.attachment_id)
                .id(&options.parameter_name)
                .build();
        let request = prepare(options, HttpMethod::Get, path)?;

        let response: DetailedResponse<ParameterInfo> = self.execute(request).await?;
        info!(status = response.status_code, "attachment parameter fetched");
        Ok(response)
    }

    /// Replace one override, addressed by parameter name.
    #[instrument(
        skip(self, options),
        fields(
            instance_id = %options.instance_id,
            attachment_id = %options.attachment_id,
            parameter_name = %options.parameter_name,
        )
    )]
    pub async fn replace_attachment_parameter_by_name(
        &self,
        options: &ReplaceAttachmentParameterByNameOptions,
    ) -> Result<DetailedResponse<ParameterInfo>> {
        let path =
            attachment_parameters(&options.instance_id, &options.profile_id, &options.attachment_id)
                .id(&options.parameter_name)
                .build();
        let request = prepare(options, HttpMethod::Put, path)?.json(to_body(&options.parameter)?);

        let response: DetailedResponse<ParameterInfo> = self.execute(request).await?;
        info!(status = response.status_code, "attachment parameter replaced");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use compliance_domain::{
        AttachmentPrototype, ComplianceError, EnablementStatus, MultiCloudScope, ParameterType,
        ScanSchedule,
    };
    use serde_json::json;

    use super::*;
    use crate::testing::RecordingTransport;

    fn service() -> (Arc<RecordingTransport>, ComplianceService<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::new());
        (Arc::clone(&transport), ComplianceService::from_arc(transport))
    }

    fn prototype() -> AttachmentPrototype {
        let scope = MultiCloudScope::new("ibm-cloud")
            .with_property("scope_id", "acct-1")
            .with_property("scope_type", "account");
        AttachmentPrototype::new(
            "nightly",
            vec![scope],
            EnablementStatus::Enabled,
            ScanSchedule::Every30Days,
        )
        .with_parameter(
            ParameterInfo::new("param1").with_type(ParameterType::Numeric).with_value(5),
        )
    }

    #[tokio::test]
    async fn test_create_wraps_attachments() {
        let (transport, service) = service();
        transport.respond_json(
            201,
            json!({
                "profile_id": "prof-1",
                "attachments": [{ "id": "att-1", "name": "nightly", "schedule": "every_30_days" }]
            }),
        );

        let options = CreateAttachmentOptions::new("inst-1", "prof-1", vec![prototype()]);
        let response = service.create_attachment(&options).await.unwrap();

        let created = response.result.unwrap();
        assert_eq!(created.attachments[0].id.as_deref(), Some("att-1"));
        assert_eq!(created.attachments[0].schedule, Some(ScanSchedule::Every30Days));

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "/instances/inst-1/v3/profiles/prof-1/attachments");
        let body = request.body.unwrap();
        assert_eq!(body["attachments"][0]["schedule"], "every_30_days");
        assert_eq!(body["attachments"][0]["status"], "enabled");
        assert_eq!(body["attachments"][0]["scope"][0]["properties"][0]["name"], "scope_id");
    }

    #[tokio::test]
    async fn test_account_attachments_filter() {
        let (transport, service) = service();
        transport.respond_json(200, json!({ "attachments": [] }));

        let options = ListAccountAttachmentsOptions::new("inst-1").with_account_id("acct-1");
        service.list_account_attachments(&options).await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.path, "/instances/inst-1/v3/attachments");
        assert_eq!(request.query, vec![("account_id".to_string(), "acct-1".to_string())]);
    }

    #[tokio::test]
    async fn test_parameter_by_name_path() {
        let (transport, service) = service();
        transport.respond_json(
            200,
            json!({
                "parameter_name": "param1",
                "parameter_type": "numeric",
                "parameter_value": 5
            }),
        );

        let options =
            GetAttachmentParameterByNameOptions::new("inst-1", "prof-1", "att-1", "param1");
        let response = service.get_attachment_parameter_by_name(&options).await.unwrap();

        let parameter = response.result.unwrap();
        assert_eq!(parameter.parameter_type, Some(ParameterType::Numeric));
        assert_eq!(parameter.parameter_value, Some(json!(5)));
        assert_eq!(
            transport.last_request().unwrap().path,
            "/instances/inst-1/v3/profiles/prof-1/attachments/att-1/parameters/param1"
        );
    }

    #[tokio::test]
    async fn test_replace_parameters_body() {
        let (transport, service) = service();

        let parameters = vec![ParameterInfo::new("param1").with_value(10)];
        let options =
            ReplaceAttachmentParametersOptions::new("inst-1", "prof-1", "att-1", parameters);
        service.replace_attachment_parameters(&options).await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.body.unwrap()["attachment_parameters"][0]["parameter_value"], 10);
    }

    #[tokio::test]
    async fn test_replace_parameter_by_name_sends_parameter() {
        let (transport, service) = service();

        let parameter = ParameterInfo::new("param1").with_value("strict");
        let options =
            ReplaceAttachmentParameterByNameOptions::new(
                "inst-1", "prof-1", "att-1", "param1", parameter,
            );
        service.replace_attachment_parameter_by_name(&options).await.unwrap();

        let request = transport.last_request().unwrap();
        let body = request.body.unwrap();
        assert_eq!(body["parameter_name"], "param1");
        assert_eq!(body["parameter_value"], "strict");
    }

    #[tokio::test]
    async fn test_missing_attachment_id_makes_no_call() {
        let (transport, service) = service();

        let err = service
            .delete_profile_attachment(&DeleteProfileAttachmentOptions::new("inst-1", "prof-1", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, ComplianceError::MissingField("attachment_id")));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_list_attachments_paging() {
        let (transport, service) = service();
        transport.respond_json(
            200,
            json!({ "total_count": 1, "limit": 5, "attachments": [{ "id": "att-1" }] }),
        );

        let options =
            ListAttachmentsOptions::new("inst-1", "prof-1").with_limit(5).with_start("c-2");
        let response = service.list_attachments(&options).await.unwrap();

        assert_eq!(response.result.unwrap().attachments.len(), 1);
        assert_eq!(transport.calls(), 1);

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.path, "/instances/inst-1/v3/profiles/prof-1/attachments");
        assert_eq!(
            request.query,
            vec![
                ("limit".to_string(), "5".to_string()),
                ("start".to_string(), "c-2".to_string()),
            ]
        );
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn test_get_attachment_path() {
        let (transport, service) = service();
        transport.respond_json(
            200,
            json!({
                "id": "att-1",
                "profile_id": "prof-1",
                "status": "enabled",
                "schedule": "daily"
            }),
        );

        let options = GetProfileAttachmentOptions::new("inst-1", "prof-1", "att-1");
        let response = service.get_profile_attachment(&options).await.unwrap();

        let attachment = response.result.unwrap();
        assert_eq!(attachment.schedule, Some(ScanSchedule::Daily));
        assert_eq!(transport.calls(), 1);

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.path, "/instances/inst-1/v3/profiles/prof-1/attachments/att-1");
        assert!(request.query.is_empty());
    }

    #[tokio::test]
    async fn test_replace_attachment_body() {
        let (transport, service) = service();
        transport.respond_json(200, json!({ "id": "att-1", "name": "nightly" }));

        let options =
            ReplaceProfileAttachmentOptions::new("inst-1", "prof-1", "att-1", prototype());
        service.replace_profile_attachment(&options).await.unwrap();
        assert_eq!(transport.calls(), 1);

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.path, "/instances/inst-1/v3/profiles/prof-1/attachments/att-1");
        let body = request.body.unwrap();
        assert_eq!(body["name"], "nightly");
        assert_eq!(body["schedule"], "every_30_days");
        assert_eq!(body["status"], "enabled");
        assert_eq!(body["attachment_parameters"][0]["parameter_name"], "param1");
        assert!(body.get("attachments").is_none());
    }

    #[tokio::test]
    async fn test_delete_attachment_tolerates_partial_body() {
        let (transport, service) = service();
        transport
            .respond_json(200, json!({}))
            .respond_json(200, json!({ "id": "att-1", "status": "removed" }));
        let options = DeleteProfileAttachmentOptions::new("inst-1", "prof-1", "att-1");

        let response = service.delete_profile_attachment(&options).await.unwrap();
        assert_eq!(response.status_code, 200);

        let response = service.delete_profile_attachment(&options).await.unwrap();
        assert_eq!(response.status_code, 200);
        assert!(response.result.is_none());
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_list_attachment_parameters_path() {
        let (transport, service) = service();
        transport.respond_json(
            200,
            json!({
                "attachment_parameters": [{
                    "parameter_name": "param1",
                    "parameter_type": "numeric",
                    "parameter_value": 5
                }]
            }),
        );

        let options = ListAttachmentParametersOptions::new("inst-1", "prof-1", "att-1");
        let response = service.list_attachment_parameters(&options).await.unwrap();

        let parameters = response.result.unwrap();
        assert_eq!(parameters.find("param1").unwrap().parameter_value, Some(json!(5)));

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(
            request.path,
            "/instances/inst-1/v3/profiles/prof-1/attachments/att-1/parameters"
        );
        assert_eq!(transport.calls(), 1);
    }
}
