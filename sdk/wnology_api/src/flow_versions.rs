//! Flow Versions resource.
//!
//! A flow version is an immutable snapshot of an application workflow. This
//! module wraps the `/applications/{applicationId}/flows/{flowId}/versions`
//! endpoints: listing versions, creating (or replacing) a version, and bulk
//! deleting versions.
//!
//! ## Example
//!
//! ```rust,no_run
//! use serde_json::json;
//! use wnology_core::client::Client;
//! use wnology_core::auth::Credential;
//! use wnology_api::flow_versions::{self, FlowVersionsPostParams};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::builder()
//!     .credential(Credential::api_token("your-token"))
//!     .build()?;
//!
//! let params = FlowVersionsPostParams {
//!     application_id: Some("my-app-id".into()),
//!     flow_id: Some("my-flow-id".into()),
//!     flow_version: Some(json!({"version": "v1", "notes": "initial release"})),
//!     ..Default::default()
//! };
//! let version = flow_versions::post(&client, params, Default::default()).await?;
//! println!("{version:#}");
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use serde_json::Value;

use wnology_core::client::{Client, RequestOptions};
use wnology_core::endpoint::{build_request, to_param_bag, EndpointSpec, Method, ParamDef, Target};
use wnology_core::error::WnologyResult;

// ---------------------------------------------------------------------------
// Endpoint tables
// ---------------------------------------------------------------------------

// Bulk deletion posts the deletion options to a dedicated sub-path.
const DELETE: EndpointSpec = EndpointSpec {
    method: Method::POST,
    template: "/applications/{applicationId}/flows/{flowId}/versions/delete",
    params: &[
        ParamDef::new("applicationId", Target::Path),
        ParamDef::new("flowId", Target::Path),
        ParamDef::new("options", Target::Body),
        ParamDef::new("losantdomain", Target::Header),
        ParamDef::new("_actions", Target::Query),
        ParamDef::new("_links", Target::Query),
        ParamDef::new("_embedded", Target::Query),
    ],
};

const GET: EndpointSpec = EndpointSpec {
    method: Method::GET,
    template: "/applications/{applicationId}/flows/{flowId}/versions",
    params: &[
        ParamDef::new("applicationId", Target::Path),
        ParamDef::new("flowId", Target::Path),
        ParamDef::new("sortField", Target::Query),
        ParamDef::new("sortDirection", Target::Query),
        ParamDef::new("page", Target::Query),
        ParamDef::new("perPage", Target::Query),
        ParamDef::new("filterField", Target::Query),
        ParamDef::new("filter", Target::Query),
        ParamDef::new("includeCustomNodes", Target::Query),
        ParamDef::structured("query"),
        ParamDef::new("losantdomain", Target::Header),
        ParamDef::new("_actions", Target::Query),
        ParamDef::new("_links", Target::Query),
        ParamDef::new("_embedded", Target::Query),
    ],
};

const POST: EndpointSpec = EndpointSpec {
    method: Method::POST,
    template: "/applications/{applicationId}/flows/{flowId}/versions",
    params: &[
        ParamDef::new("applicationId", Target::Path),
        ParamDef::new("flowId", Target::Path),
        ParamDef::new("flowVersion", Target::Body),
        ParamDef::new("includeCustomNodes", Target::Query),
        ParamDef::new("allowReplacement", Target::Query),
        ParamDef::new("losantdomain", Target::Header),
        ParamDef::new("_actions", Target::Query),
        ParamDef::new("_links", Target::Query),
        ParamDef::new("_embedded", Target::Query),
    ],
};

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Parameters for [`delete`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowVersionsDeleteParams {
    /// ID associated with the application.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,

    /// ID associated with the flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<String>,

    /// Object containing flow version deletion options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,

    /// Domain scope of request (rarely needed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub losantdomain: Option<String>,

    /// Return resource actions in response.
    #[serde(rename = "_actions", skip_serializing_if = "Option::is_none")]
    pub actions: Option<bool>,

    /// Return resource link in response.
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<bool>,

    /// Return embedded resources in response.
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<bool>,
}

/// Parameters for [`get`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowVersionsGetParams {
    /// ID associated with the application.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,

    /// ID associated with the flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<String>,

    /// Field to sort the results by. Accepted values are: version, id,
    /// creationDate, lastUpdated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,

    /// Direction to sort the results by. Accepted values are: asc, desc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<String>,

    /// Which page of results to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,

    /// How many items to return per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<String>,

    /// Field to filter the results by. Blank or not provided means no
    /// filtering. Accepted values are: version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_field: Option<String>,

    /// Filter to apply against the filtered field. Supports globbing.
    /// Blank or not provided means no filtering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// If the result of the request should also include the details of any
    /// custom nodes referenced by the returned workflows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_custom_nodes: Option<bool>,

    /// Workflow filter JSON object which overrides the filterField and
    /// filter parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,

    /// Domain scope of request (rarely needed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub losantdomain: Option<String>,

    /// Return resource actions in response.
    #[serde(rename = "_actions", skip_serializing_if = "Option::is_none")]
    pub actions: Option<bool>,

    /// Return resource link in response.
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<bool>,

    /// Return embedded resources in response.
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<bool>,
}

/// Parameters for [`post`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowVersionsPostParams {
    /// ID associated with the application.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,

    /// ID associated with the flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<String>,

    /// New flow version information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_version: Option<Value>,

    /// If the result of the request should also include the details of any
    /// custom nodes referenced by the returned workflows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_custom_nodes: Option<bool>,

    /// Allow replacement of an existing flow version with same version name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_replacement: Option<bool>,

    /// Domain scope of request (rarely needed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub losantdomain: Option<String>,

    /// Return resource actions in response.
    #[serde(rename = "_actions", skip_serializing_if = "Option::is_none")]
    pub actions: Option<bool>,

    /// Return resource link in response.
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<bool>,

    /// Return embedded resources in response.
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<bool>,
}

// ---------------------------------------------------------------------------
// API functions
// ---------------------------------------------------------------------------

/// Delete flow versions matching the supplied deletion options.
///
/// Returns an object indicating the number of flow versions deleted or
/// failed, or a job-enqueued result if the deletion was queued.
///
/// # Authentication
///
/// The client must be configured with a valid API access token. The token
/// must include at least one of the following scopes: `all.Application`,
/// `all.Organization`, `all.User`, `flowVersions.*`, or
/// `flowVersions.delete`.
///
/// # Errors
///
/// API failures surface as [`WnologyError::Api`]: 400 if the request is
/// malformed, 404 if the application was not found.
///
/// # Tracing
///
/// Emits a span named `wnology::flow_versions::delete`.
///
/// [`WnologyError::Api`]: wnology_core::WnologyError::Api
#[tracing::instrument(
    name = "wnology::flow_versions::delete",
    skip(client, params, options),
    fields(application_id = ?params.application_id, flow_id = ?params.flow_id)
)]
pub async fn delete(
    client: &Client,
    params: FlowVersionsDeleteParams,
    options: RequestOptions,
) -> WnologyResult<Value> {
    tracing::debug!("deleting flow versions");

    let request = build_request(&DELETE, to_param_bag(&params)?)?;
    client.request(&request, &options).await
}

/// Returns the flow versions for a flow.
///
/// # Authentication
///
/// The client must be configured with a valid API access token. The token
/// must include at least one of the following scopes: `all.Application`,
/// `all.Application.read`, `all.Organization`, `all.Organization.read`,
/// `all.User`, `all.User.read`, `flowVersions.*`, or `flowVersions.get`.
///
/// # Errors
///
/// API failures surface as [`WnologyError::Api`]: 400 if the request is
/// malformed, 404 if the flow was not found.
///
/// # Tracing
///
/// Emits a span named `wnology::flow_versions::get`.
///
/// [`WnologyError::Api`]: wnology_core::WnologyError::Api
#[tracing::instrument(
    name = "wnology::flow_versions::get",
    skip(client, params, options),
    fields(application_id = ?params.application_id, flow_id = ?params.flow_id)
)]
pub async fn get(
    client: &Client,
    params: FlowVersionsGetParams,
    options: RequestOptions,
) -> WnologyResult<Value> {
    tracing::debug!("listing flow versions");

    let request = build_request(&GET, to_param_bag(&params)?)?;
    client.request(&request, &options).await
}

/// Create or replace a flow version for a flow.
///
/// # Authentication
///
/// The client must be configured with a valid API access token. The token
/// must include at least one of the following scopes: `all.Application`,
/// `all.Organization`, `all.User`, `flowVersions.*`, or
/// `flowVersions.post`.
///
/// # Errors
///
/// API failures surface as [`WnologyError::Api`]: 400 if the request is
/// malformed, 404 if the flow was not found.
///
/// # Tracing
///
/// Emits a span named `wnology::flow_versions::post`.
///
/// [`WnologyError::Api`]: wnology_core::WnologyError::Api
#[tracing::instrument(
    name = "wnology::flow_versions::post",
    skip(client, params, options),
    fields(application_id = ?params.application_id, flow_id = ?params.flow_id)
)]
pub async fn post(
    client: &Client,
    params: FlowVersionsPostParams,
    options: RequestOptions,
) -> WnologyResult<Value> {
    tracing::debug!("creating flow version");

    let request = build_request(&POST, to_param_bag(&params)?)?;
    client.request(&request, &options).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_mock_client;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use wnology_core::WnologyError;

    #[tokio::test]
    async fn get_lists_versions_with_default_flags() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/applications/a/flows/f/versions"))
            .and(query_param("_actions", "false"))
            .and(query_param("_links", "true"))
            .and(query_param("_embedded", "true"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"count": 0, "items": []})),
            )
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let params = FlowVersionsGetParams {
            application_id: Some("a".into()),
            flow_id: Some("f".into()),
            ..Default::default()
        };

        let versions = get(&client, params, Default::default())
            .await
            .expect("should succeed");

        assert_eq!(versions["count"], 0);
    }

    #[tokio::test]
    async fn get_serializes_structured_query_to_json_text() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/applications/a/flows/f/versions"))
            .and(query_param("query", r#"{"version":"v1"}"#))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"count": 0, "items": []})),
            )
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let params = FlowVersionsGetParams {
            application_id: Some("a".into()),
            flow_id: Some("f".into()),
            query: Some(json!({"version": "v1"})),
            ..Default::default()
        };

        get(&client, params, Default::default())
            .await
            .expect("should succeed");
    }

    #[tokio::test]
    async fn get_without_flow_id_fails_fast() {
        let server = MockServer::start().await;
        let client = setup_mock_client(&server).await;

        let params = FlowVersionsGetParams {
            application_id: Some("a".into()),
            ..Default::default()
        };

        let err = get(&client, params, Default::default()).await.unwrap_err();

        assert!(matches!(
            err,
            WnologyError::MissingPathParam(name) if name == "flowId"
        ));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn post_sends_version_body_and_replacement_flag() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/applications/a/flows/f/versions"))
            .and(query_param("allowReplacement", "true"))
            .and(query_param("_actions", "false"))
            .and(body_json(json!({"name": "v1"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "version": "v1",
                "flowId": "f"
            })))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let params = FlowVersionsPostParams {
            application_id: Some("a".into()),
            flow_id: Some("f".into()),
            flow_version: Some(json!({"name": "v1"})),
            allow_replacement: Some(true),
            ..Default::default()
        };

        let version = post(&client, params, Default::default())
            .await
            .expect("should succeed");

        assert_eq!(version["version"], "v1");
    }

    #[tokio::test]
    async fn delete_posts_options_to_delete_sub_path() {
        let server = MockServer::start().await;

        let options = json!({"version": {"$lt": "v5"}});

        Mock::given(method("POST"))
            .and(path("/applications/a/flows/f/versions/delete"))
            .and(body_json(&options))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "deleted": 4,
                "failed": 0
            })))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let params = FlowVersionsDeleteParams {
            application_id: Some("a".into()),
            flow_id: Some("f".into()),
            options: Some(options),
            ..Default::default()
        };

        let result = delete(&client, params, Default::default())
            .await
            .expect("should succeed");

        assert_eq!(result["deleted"], 4);
    }

    #[tokio::test]
    async fn delete_accepts_job_enqueued_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/applications/a/flows/f/versions/delete"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "jobId": "job-1"
            })))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let params = FlowVersionsDeleteParams {
            application_id: Some("a".into()),
            flow_id: Some("f".into()),
            options: Some(json!({"email": true})),
            ..Default::default()
        };

        let result = delete(&client, params, Default::default())
            .await
            .expect("should succeed");

        assert_eq!(result["jobId"], "job-1");
    }
}
