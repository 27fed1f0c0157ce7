//! Integration tests for wnology_api.
//!
//! These tests require a live Wnology deployment.
//! Run with: `cargo test --features integration-tests`
//!
//! Required environment variables:
//! - `WNOLOGY_API_TOKEN`: an API access token with application scopes
//! - `WNOLOGY_APPLICATION_ID`: an application the token can read
//! - `WNOLOGY_FLOW_ID` (optional): a workflow for the flow version tests
//!
//! `WNOLOGY_API_URL` may be set to point at a non-production deployment.

#![cfg(feature = "integration-tests")]

use wnology_api::{files, flow_versions};
use wnology_core::auth::Credential;
use wnology_core::client::Client;

fn get_client() -> Client {
    std::env::var("WNOLOGY_API_TOKEN").expect("WNOLOGY_API_TOKEN not set");
    Client::builder()
        .credential(Credential::from_env())
        .build()
        .expect("Failed to build client")
}

fn get_application_id() -> String {
    std::env::var("WNOLOGY_APPLICATION_ID").expect("WNOLOGY_APPLICATION_ID not set")
}

#[tokio::test]
async fn test_files_listing() {
    let client = get_client();

    let params = files::FilesGetParams {
        application_id: Some(get_application_id()),
        per_page: Some("10".into()),
        ..Default::default()
    };

    let listing = files::get(&client, params, Default::default())
        .await
        .expect("list files");

    assert!(listing.get("count").is_some());
    assert!(listing.get("items").is_some());
}

#[tokio::test]
async fn test_files_listing_without_embedded_resources() {
    let client = get_client();

    let params = files::FilesGetParams {
        application_id: Some(get_application_id()),
        embedded: Some(false),
        ..Default::default()
    };

    let listing = files::get(&client, params, Default::default())
        .await
        .expect("list files");

    assert!(listing.get("_embedded").is_none());
}

#[tokio::test]
async fn test_flow_versions_listing() {
    let client = get_client();
    let Ok(flow_id) = std::env::var("WNOLOGY_FLOW_ID") else {
        eprintln!("WNOLOGY_FLOW_ID not set; skipping");
        return;
    };

    let params = flow_versions::FlowVersionsGetParams {
        application_id: Some(get_application_id()),
        flow_id: Some(flow_id),
        sort_field: Some("version".into()),
        sort_direction: Some("asc".into()),
        ..Default::default()
    };

    let listing = flow_versions::get(&client, params, Default::default())
        .await
        .expect("list flow versions");

    assert!(listing.get("count").is_some());
}
