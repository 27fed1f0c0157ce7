//! HTTP client for the Wnology API.
//!
//! This module provides [`Client`], the shared transport object every
//! resource module hands its requests to. The client owns the base URL,
//! authentication header injection, query/body serialization, and error
//! translation; resource functions own nothing but parameter marshaling.
//!
//! # Examples
//!
//! ## Using an API token
//! ```rust,no_run
//! use wnology_core::client::Client;
//! use wnology_core::auth::Credential;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::builder()
//!     .credential(Credential::api_token("your-token"))
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Pointing at a different deployment
//! ```rust,no_run
//! use wnology_core::client::Client;
//! use wnology_core::auth::Credential;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::builder()
//!     .endpoint("https://api.iot.example.com")
//!     .credential(Credential::from_env())
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde_json::Value;
use url::Url;

use crate::auth::Credential;
use crate::endpoint::RequestDescriptor;
use crate::error::{WnologyError, WnologyResult};

/// Default base URL for the Wnology API.
pub const DEFAULT_ENDPOINT: &str = "https://api.app.wnology.io";

/// Default connection timeout (10 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default read/response timeout (60 seconds).
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(60);

/// Per-call options for a single API request.
///
/// This is the one configuration argument every endpoint function accepts;
/// `RequestOptions::default()` is correct for almost all calls.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Override the client's read timeout for this call only.
    pub timeout: Option<Duration>,
}

/// The shared client for the Wnology REST API.
///
/// Resource modules (`wnology_api`) build a
/// [`RequestDescriptor`](crate::endpoint::RequestDescriptor) and pass it to
/// [`Client::request`], which performs the actual I/O and returns the parsed
/// JSON response body.
///
/// The client is cheaply cloneable and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
    endpoint: Url,
    credential: Credential,
}

/// Builder for constructing a [`Client`].
///
/// Use [`Client::builder()`] to create a new builder.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    endpoint: Option<String>,
    credential: Option<Credential>,
    http_client: Option<HttpClient>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
}

impl Client {
    /// Create a new builder for configuring a `Client`.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Get the base endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build the full URL for a request descriptor, including its query.
    fn url(&self, descriptor: &RequestDescriptor) -> WnologyResult<Url> {
        let mut url = self.endpoint.join(&descriptor.path).map_err(|e| {
            WnologyError::InvalidEndpoint(format!("failed to construct URL: {e}"))
        })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &descriptor.query {
                pairs.append_pair(name, &query_text(value));
            }
        }
        Ok(url)
    }

    /// Send a built request and return the parsed JSON response body.
    ///
    /// Adds the `Authorization` header when a credential is configured,
    /// renders the query bucket, serializes the JSON body, and translates
    /// error responses. One attempt per call; retry behavior belongs to
    /// callers.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be constructed, the request fails
    /// at the transport level, or the server returns a non-success status.
    pub async fn request(
        &self,
        descriptor: &RequestDescriptor,
        options: &RequestOptions,
    ) -> WnologyResult<Value> {
        let url = self.url(descriptor)?;
        tracing::debug!(method = %descriptor.method, %url, "sending request");

        let mut request = self
            .http
            .request(descriptor.method.clone(), url)
            .header("Accept", "application/json");

        if let Some(auth) = self.credential.authorization() {
            request = request.header("Authorization", auth);
        }
        for (name, value) in &descriptor.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }
        if let Some(body) = &descriptor.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        Self::check_response(response).await
    }

    /// Translate a response into a parsed body or an error.
    async fn check_response(response: reqwest::Response) -> WnologyResult<Value> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            if body.is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_str(&body)?);
        }

        // Wnology error bodies carry a type and a message.
        if let Ok(error) = serde_json::from_str::<Value>(&body) {
            if let (Some(kind), Some(message)) = (
                error.get("type").and_then(Value::as_str),
                error.get("message").and_then(Value::as_str),
            ) {
                return Err(WnologyError::Api {
                    kind: kind.to_string(),
                    message: message.to_string(),
                });
            }
        }

        Err(WnologyError::Http {
            status: status.as_u16(),
            message: body,
        })
    }
}

/// Render a query value as its text form: strings as-is, other scalars via
/// their JSON representation.
fn query_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl ClientBuilder {
    /// Set the API endpoint URL.
    ///
    /// If not set, the builder checks the `WNOLOGY_API_URL` environment
    /// variable and falls back to [`DEFAULT_ENDPOINT`].
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the credential to use for authentication.
    ///
    /// If not set, the builder uses [`Credential::from_env()`], which checks
    /// `WNOLOGY_API_TOKEN` and falls back to anonymous access.
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Set a custom HTTP client.
    ///
    /// Use this to configure proxies or other HTTP settings.
    ///
    /// **Note:** If you provide a custom HTTP client, any timeout
    /// configuration via [`connect_timeout`](Self::connect_timeout) or
    /// [`read_timeout`](Self::read_timeout) is ignored.
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set the connection timeout.
    ///
    /// **Note:** Ignored if a custom HTTP client is provided via
    /// [`http_client`](Self::http_client).
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the read timeout, covering the entire request/response cycle.
    ///
    /// **Note:** Ignored if a custom HTTP client is provided via
    /// [`http_client`](Self::http_client).
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Build the `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is invalid or the underlying
    /// HTTP client cannot be constructed.
    pub fn build(self) -> WnologyResult<Client> {
        let http = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .connect_timeout(self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT))
                .timeout(self.read_timeout.unwrap_or(DEFAULT_READ_TIMEOUT))
                .build()?,
        };

        let endpoint_str = self
            .endpoint
            .or_else(|| std::env::var("WNOLOGY_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let endpoint = Url::parse(&endpoint_str).map_err(|e| {
            WnologyError::InvalidEndpoint(format!("{endpoint_str}: {e}"))
        })?;

        let credential = self.credential.unwrap_or_else(Credential::from_env);

        Ok(Client {
            http,
            endpoint,
            credential,
        })
    }
}
