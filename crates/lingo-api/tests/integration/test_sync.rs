//! Sync push endpoints

use serde_json::json;

use lingo_core::domain::{Record, SyncBatch};
use lingo_core::ports::IRemoteApi;

use crate::common;

fn record(value: serde_json::Value) -> Record {
    Record::from_value(value).unwrap()
}

#[tokio::test]
async fn test_progress_push_wraps_records() {
    let (server, api) = common::setup().await;
    common::mount_ack(&server, "/sync/progress", 200, json!({"success": true})).await;

    let progress = vec![record(json!({"id": "p1", "lessonId": "l1", "score": 80}))];
    let ack = api.sync_progress(&progress).await.unwrap();

    assert!(ack.success);
    let bodies = common::received_bodies(&server, "/sync/progress").await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["progress"][0]["id"], json!("p1"));
}

#[tokio::test]
async fn test_batch_push_is_camel_case() {
    let (server, api) = common::setup().await;
    common::mount_ack(&server, "/sync/all", 200, json!({"success": true})).await;

    let batch = SyncBatch::new(
        vec![record(json!({"id": "p1"}))],
        vec![record(json!({"id": "a1"}))],
        vec![],
    );
    api.sync_all_data(&batch).await.unwrap();

    let bodies = common::received_bodies(&server, "/sync/all").await;
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert_eq!(body["progress"].as_array().unwrap().len(), 1);
    assert_eq!(body["activities"].as_array().unwrap().len(), 1);
    assert!(body["vocabulary"].as_array().unwrap().is_empty());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_rejected_batch_carries_message() {
    let (server, api) = common::setup().await;
    common::mount_ack(
        &server,
        "/sync/all",
        200,
        json!({"success": false, "message": "stale batch"}),
    )
    .await;

    let batch = SyncBatch::new(vec![], vec![], vec![]);
    let ack = api.sync_all_data(&batch).await.unwrap();

    assert!(!ack.success);
    assert_eq!(ack.message.as_deref(), Some("stale batch"));
}

#[tokio::test]
async fn test_server_failure_is_an_error() {
    let (server, api) = common::setup().await;
    common::mount_ack(&server, "/sync/progress", 500, json!({"success": false})).await;

    let result = api.sync_progress(&[record(json!({"id": "p1"}))]).await;
    assert!(result.is_err());
}
