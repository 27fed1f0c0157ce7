//! Helpers for testing SDK crates against a wiremock server.
//!
//! Enabled via the `test-support` feature; intended for the dev-dependency
//! sections of sibling crates.

use crate::auth::Credential;
use crate::client::Client;

/// API token used by SDK test suites (not a real token).
pub const TEST_API_TOKEN: &str = "test-api-token";

/// Build a client pointed at a mock server URI.
///
/// # Panics
///
/// Panics if the client cannot be built; acceptable in test code.
pub fn mock_client(uri: &str) -> Client {
    Client::builder()
        .endpoint(uri)
        .credential(Credential::api_token(TEST_API_TOKEN))
        .build()
        .expect("should build client")
}
