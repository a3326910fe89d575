//! HttpRemoteApi - IRemoteApi implementation over the content API
//!
//! ## Endpoints
//!
//! | Operation         | Request                         | Response                      |
//! |-------------------|---------------------------------|-------------------------------|
//! | `download_content`| `GET /content/{partition}`      | `{ success, content: [..] }`  |
//! | `sync_progress`   | `POST /sync/progress` `{progress}` | `{ success, message? }`    |
//! | `sync_all_data`   | `POST /sync/all` `SyncBatch`    | `{ success, message? }`       |
//!
//! A response carrying `success: false` is returned as-is; deciding what
//! that means is left to the caller.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use lingo_core::domain::{Partition, Record, SyncBatch};
use lingo_core::ports::{Ack, ContentResponse, IRemoteApi};

use crate::client::ApiClient;

/// Body of a progress push
#[derive(Debug, Serialize)]
struct ProgressPush<'a> {
    progress: &'a [Record],
}

/// Remote content source reached over HTTP
pub struct HttpRemoteApi {
    client: ApiClient,
}

impl HttpRemoteApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl IRemoteApi for HttpRemoteApi {
    async fn download_content(&self, partition: Partition) -> Result<ContentResponse> {
        let path = format!("/content/{}", partition.as_str());
        let response: ContentResponse = self
            .client
            .get_json(&path)
            .await
            .with_context(|| format!("Failed to download '{partition}' content"))?;

        debug!(
            %partition,
            success = response.success,
            records = response.content.len(),
            "Content response received"
        );
        Ok(response)
    }

    async fn sync_progress(&self, records: &[Record]) -> Result<Ack> {
        let ack: Ack = self
            .client
            .post_json("/sync/progress", &ProgressPush { progress: records })
            .await
            .context("Failed to push progress")?;

        debug!(records = records.len(), success = ack.success, "Progress push acknowledged");
        Ok(ack)
    }

    async fn sync_all_data(&self, batch: &SyncBatch) -> Result<Ack> {
        let ack: Ack = self
            .client
            .post_json("/sync/all", batch)
            .await
            .context("Failed to push sync batch")?;

        debug!(records = batch.len(), success = ack.success, "Sync batch acknowledged");
        Ok(ack)
    }
}
