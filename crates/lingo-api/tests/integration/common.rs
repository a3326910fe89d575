//! Shared test helpers for content API integration tests
//!
//! Each helper mounts mock endpoints on a wiremock server; `setup` returns
//! an `HttpRemoteApi` pointing at that server.

use std::time::Duration;

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lingo_api::{ApiClient, HttpRemoteApi};

pub const TEST_TOKEN: &str = "test-access-token";

/// Starts a mock server and returns a (MockServer, HttpRemoteApi) tuple
pub async fn setup() -> (MockServer, HttpRemoteApi) {
    let server = MockServer::start().await;
    let client = ApiClient::new(server.uri(), Duration::from_secs(5))
        .unwrap()
        .with_token(TEST_TOKEN);
    (server, HttpRemoteApi::new(client))
}

/// Mounts `GET /content/{partition}` returning `body`
pub async fn mount_content(server: &MockServer, partition: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/content/{partition}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mounts `POST {endpoint}` answering with `status` and `body`
pub async fn mount_ack(server: &MockServer, endpoint: &str, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Bodies of every request received at `endpoint`
pub async fn received_bodies(server: &MockServer, endpoint: &str) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == endpoint)
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}
