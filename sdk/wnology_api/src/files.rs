//! Files resource.
//!
//! Files are assets stored inside an application and organized into
//! directories. This module wraps the `/applications/{applicationId}/files`
//! endpoints: listing the files of an application and registering a new
//! file upload.
//!
//! ## Example
//!
//! ```rust,no_run
//! use wnology_core::client::Client;
//! use wnology_core::auth::Credential;
//! use wnology_api::files::{self, FilesGetParams};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::builder()
//!     .credential(Credential::api_token("your-token"))
//!     .build()?;
//!
//! let params = FilesGetParams {
//!     application_id: Some("my-app-id".into()),
//!     directory: Some("/images".into()),
//!     ..Default::default()
//! };
//! let files = files::get(&client, params, Default::default()).await?;
//! println!("{files:#}");
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

const GET: EndpointSpec = EndpointSpec {
    method: Method::GET,
    template: "/applications/{applicationId}/files",
    params: &[
        ParamDef::new("applicationId", Target::Path),
        ParamDef::new("sortField", Target::Query),
        ParamDef::new("sortDirection", Target::Query),
        ParamDef::new("page", Target::Query),
        ParamDef::new("perPage", Target::Query),
        ParamDef::new("filterField", Target::Query),
        ParamDef::new("filter", Target::Query),
        ParamDef::new("type", Target::Query),
        ParamDef::new("status", Target::Query),
        ParamDef::new("directory", Target::Query),
        ParamDef::new("losantdomain", Target::Header),
        ParamDef::new("_actions", Target::Query),
        ParamDef::new("_links", Target::Query),
        ParamDef::new("_embedded", Target::Query),
    ],
};

const POST: EndpointSpec = EndpointSpec {
    method: Method::POST,
    template: "/applications/{applicationId}/files",
    params: &[
        ParamDef::new("applicationId", Target::Path),
        ParamDef::new("file", Target::Body),
        ParamDef::new("losantdomain", Target::Header),
        ParamDef::new("_actions", Target::Query),
        ParamDef::new("_links", Target::Query),
        ParamDef::new("_embedded", Target::Query),
    ],
};

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Parameters for [`get`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesGetParams {
    /// ID associated with the application.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,

    /// Field to sort the results by. Accepted values are: lastUpdated,
    /// type, name, creationDate.
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
    /// filtering. Accepted values are: name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_field: Option<String>,

    /// Filter to apply against the filtered field. Supports globbing.
    /// Blank or not provided means no filtering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// Limit by the type (file or directory) of the file.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,

    /// Limit the result to only files of this status. Accepted values are:
    /// completed, pending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Get files that are inside of this directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,

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
pub struct FilesPostParams {
    /// ID associated with the application.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,

    /// New file information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<Value>,

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

/// Returns the files for an application.
///
/// # Authentication
///
/// The client must be configured with a valid API access token. The token
/// must include at least one of the following scopes: `all.Application`,
/// `all.Application.read`, `all.Organization`, `all.Organization.read`,
/// `all.User`, `all.User.read`, `files.*`, or `files.get`.
///
/// # Errors
///
/// API failures surface as [`WnologyError::Api`]: 400 if the request is
/// malformed, 404 if the application was not found.
///
/// # Tracing
///
/// Emits a span named `wnology::files::get`.
///
/// [`WnologyError::Api`]: wnology_core::WnologyError::Api
#[tracing::instrument(
    name = "wnology::files::get",
    skip(client, params, options),
    fields(application_id = ?params.application_id)
)]
pub async fn get(
    client: &Client,
    params: FilesGetParams,
    options: RequestOptions,
) -> WnologyResult<Value> {
    tracing::debug!("listing files");

    let request = build_request(&GET, to_param_bag(&params)?)?;
    client.request(&request, &options).await
}

/// Create a new file for an application.
///
/// The response carries a signed post URL to upload the file content to.
///
/// # Authentication
///
/// The client must be configured with a valid API access token. The token
/// must include at least one of the following scopes: `all.Application`,
/// `all.Organization`, `all.User`, `files.*`, or `files.post`.
///
/// # Errors
///
/// API failures surface as [`WnologyError::Api`]: 400 if the request is
/// malformed, 404 if the application was not found.
///
/// # Tracing
///
/// Emits a span named `wnology::files::post`.
///
/// [`WnologyError::Api`]: wnology_core::WnologyError::Api
#[tracing::instrument(
    name = "wnology::files::post",
    skip(client, params, options),
    fields(application_id = ?params.application_id)
)]
pub async fn post(
    client: &Client,
    params: FilesPostParams,
    options: RequestOptions,
) -> WnologyResult<Value> {
    tracing::debug!("creating file");

    let request = build_request(&POST, to_param_bag(&params)?)?;
    client.request(&request, &options).await
}
