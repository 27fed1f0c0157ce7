use secrecy::{ExposeSecret, SecretString};

/// Credential used to authenticate against the Wnology API.
#[derive(Clone)]
pub enum Credential {
    /// API access token issued by the platform.
    ApiToken(SecretString),

    /// No credential. Only endpoints that allow anonymous access succeed.
    Anonymous,
}

impl Credential {
    /// Create a credential from the `WNOLOGY_API_TOKEN` environment variable.
    /// Falls back to [`Credential::Anonymous`] if the variable is not set.
    pub fn from_env() -> Self {
        match std::env::var("WNOLOGY_API_TOKEN") {
            Ok(token) if !token.is_empty() => Self::ApiToken(SecretString::from(token)),
            _ => Self::Anonymous,
        }
    }

    /// Create an API token credential.
    pub fn api_token(token: impl Into<String>) -> Self {
        Self::ApiToken(SecretString::from(token.into()))
    }

    /// Create an anonymous credential.
    pub fn anonymous() -> Self {
        Self::Anonymous
    }

    /// Resolve the credential to an `Authorization` header value, if any.
    pub fn authorization(&self) -> Option<String> {
        match self {
            Self::ApiToken(token) => Some(format!("Bearer {}", token.expose_secret())),
            Self::Anonymous => None,
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiToken(_) => write!(f, "Credential::ApiToken(****)"),
            Self::Anonymous => write!(f, "Credential::Anonymous"),
        }
    }
}
