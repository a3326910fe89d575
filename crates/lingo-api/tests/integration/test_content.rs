//! Content download endpoint

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use lingo_api::{ApiClient, ApiError, HttpRemoteApi};
use lingo_core::domain::Partition;
use lingo_core::ports::IRemoteApi;

use crate::common;

#[tokio::test]
async fn test_download_returns_content() {
    let (server, api) = common::setup().await;
    common::mount_content(
        &server,
        "vocabulary",
        json!({
            "success": true,
            "content": [
                {"id": "v1", "telugu": "నీరు", "english": "water", "category": "food"},
                {"id": "v2", "telugu": "పాలు", "english": "milk", "category": "food"}
            ]
        }),
    )
    .await;

    let response = api.download_content(Partition::Vocabulary).await.unwrap();

    assert!(response.success);
    assert_eq!(response.content.len(), 2);
    assert_eq!(response.content[0].get("english"), Some(&json!("water")));
}

#[tokio::test]
async fn test_download_sends_bearer_token() {
    let (server, api) = common::setup().await;
    Mock::given(method("GET"))
        .and(path("/content/lessons"))
        .and(header("authorization", format!("Bearer {}", common::TEST_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "content": []})))
        .expect(1)
        .mount(&server)
        .await;

    api.download_content(Partition::Lessons).await.unwrap();
}

#[tokio::test]
async fn test_negative_ack_is_not_an_error() {
    let (server, api) = common::setup().await;
    common::mount_content(&server, "activities", json!({"success": false})).await;

    let response = api.download_content(Partition::Activities).await.unwrap();

    assert!(!response.success);
    assert!(response.content.is_empty());
}

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let (server, api) = common::setup().await;
    Mock::given(method("GET"))
        .and(path("/content/lessons"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = api.download_content(Partition::Lessons).await.unwrap_err();

    match err.downcast_ref::<ApiError>() {
        Some(ApiError::ServerError { status, body }) => {
            assert_eq!(*status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_and_rate_limited() {
    let (server, api) = common::setup().await;
    Mock::given(method("GET"))
        .and(path("/content/lessons"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/content/progress"))
        .respond_with(ResponseTemplate::new(429).append_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let err = api.download_content(Partition::Lessons).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::Unauthorized(_))));

    let err = api.download_content(Partition::Progress).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::TooManyRequests { retry_after: Some(d) }) if *d == Duration::from_secs(7)
    ));
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let (server, api) = common::setup().await;
    Mock::given(method("GET"))
        .and(path("/content/lessons"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = api.download_content(Partition::Lessons).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let client = ApiClient::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
    let api = HttpRemoteApi::new(client);

    let err = api.download_content(Partition::Lessons).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::NetworkError(_))));
}
