use compliance_domain::{
    ControlLibrary, ControlLibraryCollection, ControlLibraryDelete, DetailedResponse, Result,
};
use tracing::{info, instrument};

use super::{prepare, to_body, ComplianceService};
use crate::options::{
    CreateCustomControlLibraryOptions, DeleteCustomControlLibraryOptions, GetControlLibraryOptions,
    ListControlLibrariesOptions, ReplaceCustomControlLibraryOptions,
};
use crate::transport::{HttpMethod, ResourcePath, Transport};

const CONTROL_LIBRARIES: &str = "control_libraries";

impl<T: Transport> ComplianceService<T> {
    /// Create a custom control library.
    ///
    /// # Errors
    /// `MissingField` when the name, description or controls are absent;
    /// otherwise whatever the transport reports.
    #[instrument(skip(self, options), fields(instance_id = %options.instance_id))]
    pub async fn create_custom_control_library(
        &self,
        options: &CreateCustomControlLibraryOptions,
    ) -> Result<DetailedResponse<ControlLibrary>> {
        let path =
            ResourcePath::instance(&options.instance_id).collection(CONTROL_LIBRARIES).build();
        let request = prepare(options, HttpMethod::Post, path)?.json(to_body(&options.library)?);

        let response: DetailedResponse<ControlLibrary> = self.execute(request).await?;
        info!(
            status = response.status_code,
            control_library_id = response.result.as_ref().and_then(|l| l.id.as_deref()),
            "control library created"
        );
        Ok(response)
    }

    /// List control libraries, one page at a time.
    #[instrument(skip(self, options), fields(instance_id = %options.instance_id))]
    pub async fn list_control_libraries(
        &self,
        options: &ListControlLibrariesOptions,
    ) -> Result<DetailedResponse<ControlLibraryCollection>> {
        let path =
            ResourcePath::instance(&options.instance_id).collection(CONTROL_LIBRARIES).build();
        let request = prepare(options, HttpMethod::Get, path)?
            .query_opt("limit", options.limit)
            .query_opt("start", options.start.as_deref())
            .query_opt("control_library_type", options.control_library_type);

        let response: DetailedResponse<ControlLibraryCollection> = self.execute(request).await?;
        info!(
            status = response.status_code,
            count = response.result.as_ref().map_or(0, |c| c.control_libraries.len()),
            "control libraries listed"
        );
        Ok(response)
    }

    #[instrument(
        skip(self, options),
        fields(
            instance_id = %options.instance_id,
            control_library_id = %options.control_library_id,
        )
    )]
    pub async fn get_control_library(
        &self,
        options: &GetControlLibraryOptions,
    ) -> Result<DetailedResponse<ControlLibrary>> {
        let path = ResourcePath::instance(&options.instance_id)
            .collection(CONTROL_LIBRARIES)
            .id(&options.control_library_id)
            .build();
        let request = prepare(options, HttpMethod::Get, path)?;

        let response: DetailedResponse<ControlLibrary> = self.execute(request).await?;
        info!(status = response.status_code, "control library fetched");
        Ok(response)
    }

    /// Replace a custom control library wholesale.
    #[instrument(
        skip(self, options),
        fields(
            instance_id = %options.instance_id,
            control_library_id = %options.control_library_id,
        )
    )]
    pub async fn replace_custom_control_library(
        &self,
        options: &ReplaceCustomControlLibraryOptions,
    ) -> Result<DetailedResponse<ControlLibrary>> {
        let path = ResourcePath::instance(&options.instance_id)
            .collection(CONTROL_LIBRARIES)
            .id(&options.control_library_id)
            .build();
        let request = prepare(options, HttpMethod::Put, path)?.json(to_body(&options.library)?);

        let response: DetailedResponse<ControlLibrary> = self.execute(request).await?;
        info!(status = response.status_code, "control library replaced");
        Ok(response)
    }

    /// Delete a custom control library. Predefined libraries are rejected by
    /// the service.
    #[instrument(
        skip(self, options),
        fields(
            instance_id = %options.instance_id,
            control_library_id = %options.control_library_id,
        )
    )]
    pub async fn delete_custom_control_library(
        &self,
        options: &DeleteCustomControlLibraryOptions,
    ) -> Result<DetailedResponse<ControlLibraryDelete>> {
        let path = ResourcePath::instance(&options.instance_id)
            .collection(CONTROL_LIBRARIES)
            .id(&options.control_library_id)
            .build();
        let request = prepare(options, HttpMethod::Delete, path)?;

        let response: DetailedResponse<ControlLibraryDelete> =
            self.execute_delete(request).await?;
        info!(status = response.status_code, "control library deleted");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use compliance_domain::{ComplianceError, Control, ControlLibraryPrototype, ControlLibraryType};
    use serde_json::json;

    use super::*;
    use crate::testing::RecordingTransport;

    fn service() -> (Arc<RecordingTransport>, ComplianceService<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::new());
        (Arc::clone(&transport), ComplianceService::from_arc(transport))
    }

    fn prototype() -> ControlLibraryPrototype {
        ControlLibraryPrototype {
            control_library_name: "custom library".into(),
            control_library_description: "network controls".into(),
            control_library_type: ControlLibraryType::Custom,
            control_library_version: Some("1.0.0".into()),
            version_group_label: None,
            latest: Some(true),
            controls: vec![Control { control_name: "SC-7".into(), ..Control::default() }],
        }
    }

    #[tokio::test]
    async fn test_create_posts_library_body() {
        let (transport, service) = service();
        transport.respond_json(
            201,
            json!({
                "id": "lib-1",
                "control_library_name": "custom library",
                "control_library_description": "network controls",
                "control_library_type": "custom",
                "controls": []
            }),
        );

        let options = CreateCustomControlLibraryOptions::new("inst-1", prototype());
        let response = service.create_custom_control_library(&options).await.unwrap();

        assert_eq!(response.status_code, 201);
        assert_eq!(response.result.unwrap().id.as_deref(), Some("lib-1"));
        assert_eq!(transport.calls(), 1);

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "/instances/inst-1/v3/control_libraries");
        let body = request.body.unwrap();
        assert_eq!(body["control_library_type"], "custom");
        assert_eq!(body["controls"][0]["control_name"], "SC-7");
    }

    #[tokio::test]
    async fn test_list_sends_paging_query() {
        let (transport, service) = service();
        transport.respond_json(200, json!({ "limit": 2, "control_libraries": [] }));

        let options = ListControlLibrariesOptions::new("inst-1")
            .with_limit(2)
            .with_start("cursor-1")
            .with_type(ControlLibraryType::Predefined);
        service.list_control_libraries(&options).await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(
            request.query,
            vec![
                ("limit".to_string(), "2".to_string()),
                ("start".to_string(), "cursor-1".to_string()),
                ("control_library_type".to_string(), "predefined".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_with_empty_body() {
        let (transport, service) = service();
        transport.respond_empty(204);

        let options = DeleteCustomControlLibraryOptions::new("inst-1", "lib-1");
        let response = service.delete_custom_control_library(&options).await.unwrap();

        assert_eq!(response.status_code, 204);
        assert!(response.result.is_none());
        assert_eq!(transport.last_request().unwrap().method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn test_missing_library_id_makes_no_call() {
        let (transport, service) = service();

        let err = service
            .get_control_library(&GetControlLibraryOptions::new("inst-1", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, ComplianceError::MissingField("control_library_id")));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_replace_puts_library_body() {
        let (transport, service) = service();
        transport.respond_json(
            200,
            json!({
                "id": "lib-1",
                "control_library_name": "custom library",
                "control_library_type": "custom",
                "control_library_version": "1.0.1"
            }),
        );

        let mut library = prototype();
        library.control_library_version = Some("1.0.1".into());
        let options = ReplaceCustomControlLibraryOptions::new("inst-1", "lib-1", library);
        let response = service.replace_custom_control_library(&options).await.unwrap();

        let library = response.result.unwrap();
        assert_eq!(library.control_library_version.as_deref(), Some("1.0.1"));
        assert_eq!(transport.calls(), 1);

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.path, "/instances/inst-1/v3/control_libraries/lib-1");
        assert!(request.query.is_empty());
        let body = request.body.unwrap();
        assert_eq!(body["control_library_version"], "1.0.1");
        assert_eq!(body["control_library_description"], "network controls");
        assert_eq!(body["controls"][0]["control_name"], "SC-7");
    }

    #[tokio::test]
    async fn test_delete_with_unexpected_body_keeps_status() {
        let (transport, service) = service();
        transport
            .respond_json(200, json!({}))
            .respond_json(200, json!({ "deleted": { "id": "lib-1" } }));
        let options = DeleteCustomControlLibraryOptions::new("inst-1", "lib-1");

        let response = service.delete_custom_control_library(&options).await.unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.result, Some(ControlLibraryDelete::default()));

        let response = service.delete_custom_control_library(&options).await.unwrap();
        assert_eq!(response.status_code, 200);
        assert!(response.result.is_none());
    }
}
