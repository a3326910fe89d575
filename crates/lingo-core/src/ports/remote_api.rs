//! Remote content and sync API port (driven/secondary port)
//!
//! This module defines the interface to the remote learning-content service.
//! Its contract is assumed, not designed here; the HTTP adapter lives in
//! `lingo-api`.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` for transport failures. A response that arrives
//!   but carries `success: false` is returned as `Ok` so the use case can
//!   tell the two apart.
//! - `ContentResponse` and `Ack` are port-level DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::{Partition, Record, SyncBatch};

/// Response to a content download request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentResponse {
    /// Whether the remote produced content
    pub success: bool,
    /// Records of the requested partition
    #[serde(default)]
    pub content: Vec<Record>,
}

/// Acknowledgement of a sync push
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ack {
    /// Whether the remote accepted the push
    pub success: bool,
    /// Optional explanation from the remote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Ack {
    /// A positive acknowledgement
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// A negative acknowledgement with a reason
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Port trait for the remote content and sync API
#[async_trait::async_trait]
pub trait IRemoteApi: Send + Sync {
    /// Fetches the content of one partition
    async fn download_content(&self, partition: Partition) -> anyhow::Result<ContentResponse>;

    /// Pushes learner progress records to the dedicated progress endpoint
    async fn sync_progress(&self, records: &[Record]) -> anyhow::Result<Ack>;

    /// Pushes a full batch to the sync endpoint
    async fn sync_all_data(&self, batch: &SyncBatch) -> anyhow::Result<Ack>;
}
