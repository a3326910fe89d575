//! Partition clearing use case

use std::sync::Arc;

use tracing::info;

use crate::domain::{OfflineError, Partition};
use crate::ports::ILocalStore;

use super::locks::PartitionLocks;

/// Use case for emptying one partition of the local store
pub struct ClearPartitionUseCase {
    store: Arc<dyn ILocalStore>,
    locks: Arc<PartitionLocks>,
}

impl ClearPartitionUseCase {
    pub fn new(store: Arc<dyn ILocalStore>, locks: Arc<PartitionLocks>) -> Self {
        Self { store, locks }
    }

    /// Removes every record of `partition`, returning how many there were
    ///
    /// Clearing an empty partition succeeds and returns 0. Other partitions
    /// are never touched.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, partition: Partition) -> Result<u64, OfflineError> {
        let _guard = self.locks.try_acquire("clear", &[partition])?;

        let removed = self
            .store
            .count(partition)
            .await
            .map_err(|e| OfflineError::StorageReadFailed {
                partition,
                reason: format!("{e:#}"),
            })?;
        self.store
            .clear(partition)
            .await
            .map_err(|e| OfflineError::StorageWriteFailed {
                partition,
                reason: format!("{e:#}"),
            })?;

        info!(%partition, removed, "Partition cleared");
        Ok(removed)
    }
}
