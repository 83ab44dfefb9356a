use compliance_domain::{
    DetailedResponse, Profile, ProfileCollection, ProfileParameterCollection, Result,
};
use serde_json::json;
use tracing::{info, instrument};

use super::{prepare, to_body, ComplianceService};
use crate::options::{
    CreateProfileOptions, DeleteCustomProfileOptions, GetProfileOptions,
    ListProfileParametersOptions, ListProfilesOptions, ReplaceProfileOptions,
    ReplaceProfileParametersOptions,
};
use crate::transport::{HttpMethod, ResourcePath, Transport};

const PROFILES: &str = "profiles";
const PARAMETERS: &str = "parameters";

impl<T: Transport> ComplianceService<T> {
    /// Create a custom profile from controls of existing libraries.
    ///
    /// # Errors
    /// `MissingField` when the name or controls are absent, or a control
    /// reference is incomplete.
    #[instrument(
        skip(self, options),
        fields(instance_id = %options.instance_id, profile_name = %options.profile.profile_name)
    )]
    pub async fn create_profile(
        &self,
        options: &CreateProfileOptions,
    ) -> Result<DetailedResponse<Profile>> {
        let path = ResourcePath::instance(&options.instance_id).collection(PROFILES).build();
        let request = prepare(options, HttpMethod::Post, path)?.json(to_body(&options.profile)?);

        let response: DetailedResponse<Profile> = self.execute(request).await?;
        info!(
            status = response.status_code,
            profile_id = response.result.as_ref().and_then(|p| p.id.as_deref()),
            "profile created"
        );
        Ok(response)
    }

    #[instrument(skip(self, options), fields(instance_id = %options.instance_id))]
    pub async fn list_profiles(
        &self,
        options: &ListProfilesOptions,
    ) -> Result<DetailedResponse<ProfileCollection>> {
        let path = ResourcePath::instance(&options.instance_id).collection(PROFILES).build();
        let request = prepare(options, HttpMethod::Get, path)?
            .query_opt("limit", options.limit)
            .query_opt("start", options.start.as_deref())
            .query_opt("profile_type", options.profile_type);

        let response: DetailedResponse<ProfileCollection> = self.execute(request).await?;
        info!(
            status = response.status_code,
            count = response.result.as_ref().map_or(0, |c| c.profiles.len()),
            "profiles listed"
        );
        Ok(response)
    }

    #[instrument(
        skip(self, options),
        fields(instance_id = %options.instance_id, profile_id = %options.profile_id)
    )]
    pub async fn get_profile(
        &self,
        options: &GetProfileOptions,
    ) -> Result<DetailedResponse<Profile>> {
        let path = ResourcePath::instance(&options.instance_id)
            .collection(PROFILES)
            .id(&options.profile_id)
            .build();
        let request = prepare(options, HttpMethod::Get, path)?;

        let response: DetailedResponse<Profile> = self.execute(request).await?;
        info!(status = response.status_code, "profile fetched");
        Ok(response)
    }

    #[instrument(
        skip(self, options),
        fields(instance_id = %options.instance_id, profile_id = %options.profile_id)
    )]
    pub async fn replace_profile(
        &self,
        options: &ReplaceProfileOptions,
    ) -> Result<DetailedResponse<Profile>> {
        let path = ResourcePath::instance(&options.instance_id)
            .collection(PROFILES)
            .id(&options.profile_id)
            .build();
        let request = prepare(options, HttpMethod::Put, path)?.json(to_body(&options.profile)?);

        let response: DetailedResponse<Profile> = self.execute(request).await?;
        info!(status = response.status_code, "profile replaced");
        Ok(response)
    }

    /// Delete a custom profile. The service echoes the deleted profile when
    /// it returns a body.
    #[instrument(
        skip(self, options),
        fields(instance_id = %options.instance_id, profile_id = %options.profile_id)
    )]
    pub async fn delete_custom_profile(
        &self,
        options: &DeleteCustomProfileOptions,
    ) -> Result<DetailedResponse<Profile>> {
        let path = ResourcePath::instance(&options.instance_id)
            .collection(PROFILES)
            .id(&options.profile_id)
            .build();
        let request = prepare(options, HttpMethod::Delete, path)?;

        let response: DetailedResponse<Profile> = self.execute_delete(request).await?;
        info!(status = response.status_code, "profile deleted");
        Ok(response)
    }

    /// Default parameter values of a profile.
    #[instrument(
        skip(self, options),
        fields(instance_id = %options.instance_id, profile_id = %options.profile_id)
    )]
    pub async fn list_profile_parameters(
        &self,
        options: &ListProfileParametersOptions,
    ) -> Result<DetailedResponse<ProfileParameterCollection>> {
        let path = ResourcePath::instance(&options.instance_id)
            .collection(PROFILES)
            .id(&options.profile_id)
            .collection(PARAMETERS)
            .build();
        let request = prepare(options, HttpMethod::Get, path)?;

        let response: DetailedResponse<ProfileParameterCollection> = self.execute(request).await?;
        info!(
            status = response.status_code,
            count = response.result.as_ref().map_or(0, |c| c.default_parameters.len()),
            "profile parameters listed"
        );
        Ok(response)
    }

    /// Replace every default parameter of a profile.
    #[instrument(
        skip(self, options),
        fields(instance_id = %options.instance_id, profile_id = %options.profile_id)
    )]
    pub async fn replace_profile_parameters(
        &self,
        options: &ReplaceProfileParametersOptions,
    ) -> Result<DetailedResponse<ProfileParameterCollection>> {
        let path = ResourcePath::instance(&options.instance_id)
            .collection(PROFILES)
            .id(&options.profile_id)
            .collection(PARAMETERS)
            .build();
        let body = json!({
            "id": options.profile_id,
            "default_parameters": to_body(&options.default_parameters)?,
        });
        let request = prepare(options, HttpMethod::Put, path)?.json(body);

        let response: DetailedResponse<ProfileParameterCollection> = self.execute(request).await?;
        info!(status = response.status_code, "profile parameters replaced");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use compliance_domain::constants::{HEADER_CORRELATION_ID, HEADER_REQUEST_ID};
    use compliance_domain::{
        ApiFailure, ComplianceError, DefaultParameter, ProfileControlPrototype, ProfilePrototype,
        ProfileType,
    };
    use serde_json::json;

    use super::*;
    use crate::testing::RecordingTransport;

    fn service() -> (Arc<RecordingTransport>, ComplianceService<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::new());
        (Arc::clone(&transport), ComplianceService::from_arc(transport))
    }

    fn prototype() -> ProfilePrototype {
        ProfilePrototype {
            profile_name: "p1".into(),
            profile_description: Some("payments baseline".into()),
            profile_type: ProfileType::Custom,
            profile_version: Some("1.0".into()),
            latest: None,
            version_group_label: None,
            controls: vec![ProfileControlPrototype::new("lib-1", "ctrl-1")],
            default_parameters: Vec::new(),
        }
    }

    fn profile_json(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "profile_name": "p1",
            "profile_type": "custom",
            "profile_version": "1.0",
            "controls": [{ "control_library_id": "lib-1", "control_id": "ctrl-1" }]
        })
    }

    #[tokio::test]
    async fn test_create_profile_sends_one_request() {
        let (transport, service) = service();
        transport.respond_json(201, profile_json("prof-1"));

        let options = CreateProfileOptions::new("inst-1", prototype()).with_transaction_id("tx-1");
        let response = service.create_profile(&options).await.unwrap();

        assert_eq!(response.status_code, 201);
        let profile = response.result.unwrap();
        assert_eq!(profile.id.as_deref(), Some("prof-1"));
        assert_eq!(profile.profile_name, "p1");
        assert_eq!(transport.calls(), 1);

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "/instances/inst-1/v3/profiles");
        assert_eq!(request.header_value(HEADER_CORRELATION_ID), Some("tx-1"));
        assert_eq!(request.header_value(HEADER_REQUEST_ID), None);
        assert_eq!(request.body.unwrap()["controls"][0]["control_id"], "ctrl-1");
    }

    #[tokio::test]
    async fn test_transaction_id_generated_when_absent() {
        let (transport, service) = service();
        transport.respond_json(200, profile_json("prof-1"));

        service.get_profile(&GetProfileOptions::new("inst-1", "prof-1")).await.unwrap();

        let request = transport.last_request().unwrap();
        let generated = request.header_value(HEADER_CORRELATION_ID).unwrap();
        assert!(uuid::Uuid::parse_str(generated).is_ok());
    }

    #[tokio::test]
    async fn test_request_id_forwarded() {
        let (transport, service) = service();

        let options = GetProfileOptions::new("inst-1", "prof-1").with_request_id("req-9");
        service.get_profile(&options).await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.header_value(HEADER_REQUEST_ID), Some("req-9"));
    }

    #[tokio::test]
    async fn test_invalid_create_makes_no_call() {
        let (transport, service) = service();
        let mut profile = prototype();
        profile.controls.clear();

        let options = CreateProfileOptions::new("inst-1", profile);
        let err = service.create_profile(&options).await.unwrap_err();

        assert!(matches!(err, ComplianceError::MissingField("controls")));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_remote_error_passes_through() {
        let (transport, service) = service();
        transport.respond_error(ComplianceError::Api(Box::new(ApiFailure {
            status_code: 404,
            message: "profile not found".into(),
            body: None,
        })));

        let err = service.get_profile(&GetProfileOptions::new("inst-1", "gone")).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_list_profiles_query() {
        let (transport, service) = service();
        transport.respond_json(200, json!({ "limit": 10, "profiles": [profile_json("prof-1")] }));

        let options =
            ListProfilesOptions::new("inst-1").with_limit(10).with_type(ProfileType::Custom);
        let response = service.list_profiles(&options).await.unwrap();

        let collection = response.result.unwrap();
        assert!(collection.find("p1", "1.0").is_some());
        let request = transport.last_request().unwrap();
        assert_eq!(
            request.query,
            vec![
                ("limit".to_string(), "10".to_string()),
                ("profile_type".to_string(), "custom".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_replace_profile_parameters_body() {
        let (transport, service) = service();
        transport.respond_json(
            200,
            json!({
                "id": "prof-1",
                "default_parameters": [
                    { "parameter_name": "tls_version", "parameter_default_value": "1.2" }
                ]
            }),
        );

        let parameters = vec![DefaultParameter::new("tls_version").with_default_value("1.2")];
        let options = ReplaceProfileParametersOptions::new("inst-1", "prof-1", parameters);
        let response = service.replace_profile_parameters(&options).await.unwrap();

        assert_eq!(response.result.unwrap().default_parameters.len(), 1);
        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.path, "/instances/inst-1/v3/profiles/prof-1/parameters");
        let body = request.body.unwrap();
        assert_eq!(body["id"], "prof-1");
        assert_eq!(body["default_parameters"][0]["parameter_default_value"], "1.2");
    }

    #[tokio::test]
    async fn test_delete_profile_empty_body() {
        let (transport, service) = service();
        transport.respond_empty(204);

        let response = service
            .delete_custom_profile(&DeleteCustomProfileOptions::new("inst-1", "prof-1"))
            .await
            .unwrap();

        assert_eq!(response.status_code, 204);
        assert!(response.result.is_none());
    }

    #[tokio::test]
    async fn test_delete_profile_partial_body_is_success() {
        let (transport, service) = service();
        transport.respond_json(200, json!({})).respond_json(200, json!({ "id": "prof-1" }));
        let options = DeleteCustomProfileOptions::new("inst-1", "prof-1");

        for _ in 0..2 {
            let response = service.delete_custom_profile(&options).await.unwrap();
            assert_eq!(response.status_code, 200);
            assert!(response.result.is_none());
        }
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_delete_profile_full_body_is_decoded() {
        let (transport, service) = service();
        transport.respond_json(200, profile_json("prof-1"));

        let response = service
            .delete_custom_profile(&DeleteCustomProfileOptions::new("inst-1", "prof-1"))
            .await
            .unwrap();

        assert_eq!(response.result.unwrap().id.as_deref(), Some("prof-1"));
        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.path, "/instances/inst-1/v3/profiles/prof-1");
    }

    #[tokio::test]
    async fn test_dot_segment_id_makes_no_call() {
        let (transport, service) = service();

        for id in ["..", "."] {
            let err = service
                .delete_custom_profile(&DeleteCustomProfileOptions::new("inst-1", id))
                .await
                .unwrap_err();
            assert!(matches!(err, ComplianceError::InvalidInput(_)), "{id}");
        }
        let err = service.get_profile(&GetProfileOptions::new("..", "prof-1")).await.unwrap_err();
        assert!(matches!(err, ComplianceError::InvalidInput(_)));

        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_replace_profile_puts_body() {
        let (transport, service) = service();
        transport.respond_json(200, profile_json("prof-1"));

        let mut profile = prototype();
        profile.profile_version = Some("1.1".into());
        let options = ReplaceProfileOptions::new("inst-1", "prof-1", profile);
        let response = service.replace_profile(&options).await.unwrap();

        assert_eq!(response.result.unwrap().id.as_deref(), Some("prof-1"));
        assert_eq!(transport.calls(), 1);

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.path, "/instances/inst-1/v3/profiles/prof-1");
        let body = request.body.unwrap();
        assert_eq!(body["profile_version"], "1.1");
        assert_eq!(body["controls"][0]["control_library_id"], "lib-1");
    }

    #[tokio::test]
    async fn test_list_profile_parameters_path() {
        let (transport, service) = service();
        transport.respond_json(
            200,
            json!({
                "id": "prof-1",
                "default_parameters": [
                    { "parameter_name": "tls_version", "parameter_default_value": "1.2" }
                ]
            }),
        );

        let options = ListProfileParametersOptions::new("inst-1", "prof-1");
        let response = service.list_profile_parameters(&options).await.unwrap();

        let parameters = response.result.unwrap().default_parameters;
        assert_eq!(parameters.len(), 1);
        assert_eq!(parameters[0].parameter_name, "tls_version");

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.path, "/instances/inst-1/v3/profiles/prof-1/parameters");
        assert!(request.body.is_none());
        assert_eq!(transport.calls(), 1);
    }
}
