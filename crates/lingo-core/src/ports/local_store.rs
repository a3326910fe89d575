//! Local partitioned store port (driven/secondary port)
//!
//! This module defines the interface for durable, partition-scoped record
//! persistence that survives restarts.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because storage errors are adapter-specific
//!   (SQLite, in-memory, ...); use cases classify them into `OfflineError`.
//! - `put` takes a slice so single-record and batch writes share one path.
//!   Each record write must be atomic; the batch as a whole need not be.
//! - `capacity` has a default implementation that degrades every failure to
//!   an all-zero snapshot, so adapters only report raw figures.

use crate::domain::{Partition, QuotaEstimate, Record, RecordId, StorageInfo};

/// Port trait for the local partitioned store
///
/// ## Implementation Notes
///
/// - `initialize` must be idempotent and safe to call on every start.
/// - Writes upsert by the partition's identifier field; records without a
///   usable identifier are rejected.
/// - `get` returns `Ok(None)` for a missing key, never an error.
/// - `get_all` makes no ordering promise.
/// - `remove` skips ids that are not stored.
/// - `clear` on an empty partition is a successful no-op.
#[async_trait::async_trait]
pub trait ILocalStore: Send + Sync {
    /// Opens or creates the store and its partitions
    async fn initialize(&self) -> anyhow::Result<()>;

    /// Upserts records into a partition
    async fn put(&self, partition: Partition, records: &[Record]) -> anyhow::Result<()>;

    /// Retrieves one record by identifier
    async fn get(&self, partition: Partition, id: &RecordId) -> anyhow::Result<Option<Record>>;

    /// Retrieves every record of a partition
    async fn get_all(&self, partition: Partition) -> anyhow::Result<Vec<Record>>;

    /// Removes the listed records of a partition
    async fn remove(&self, partition: Partition, ids: &[RecordId]) -> anyhow::Result<()>;

    /// Removes every record of a partition
    async fn clear(&self, partition: Partition) -> anyhow::Result<()>;

    /// Counts the records of a partition
    async fn count(&self, partition: Partition) -> anyhow::Result<u64> {
        Ok(self.get_all(partition).await?.len() as u64)
    }

    /// Reports raw usage figures
    ///
    /// `Ok(None)` means the backend cannot report quota.
    async fn quota_estimate(&self) -> anyhow::Result<Option<QuotaEstimate>>;

    /// Returns a live storage snapshot, never failing
    async fn capacity(&self) -> StorageInfo {
        match self.quota_estimate().await {
            Ok(Some(estimate)) => StorageInfo::from(estimate),
            Ok(None) => StorageInfo::unavailable(),
            Err(err) => {
                tracing::warn!(error = %err, "Storage quota unavailable, reporting zeros");
                StorageInfo::unavailable()
            }
        }
    }
}
