use thiserror::Error;

/// Errors that can occur when building or sending a Wnology API request.
#[derive(Error, Debug)]
pub enum WnologyError {
    /// A URI-template variable had no corresponding parameter.
    #[error("missing required path parameter: {0}")]
    MissingPathParam(String),

    /// The request failed due to an HTTP error.
    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    /// The request payload could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The HTTP request failed at the transport level.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint URL is invalid.
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    /// A required configuration value is missing.
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    /// The API returned an error response.
    #[error("API error ({kind}): {message}")]
    Api { kind: String, message: String },
}

/// Result type alias for Wnology operations.
pub type WnologyResult<T> = std::result::Result<T, WnologyError>;
