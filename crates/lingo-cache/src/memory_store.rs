//! Volatile in-process implementation of ILocalStore
//!
//! Used when the SQLite database cannot be opened. Nothing survives a
//! restart and no quota is reported.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use lingo_core::domain::{Partition, QuotaEstimate, Record, RecordId};
use lingo_core::ports::ILocalStore;

use crate::CacheError;

type Partitions = HashMap<Partition, HashMap<RecordId, Record>>;

/// In-memory local store
#[derive(Debug, Default)]
pub struct MemoryLocalStore {
    partitions: RwLock<Partitions>,
}

impl MemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Partitions> {
        self.partitions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Partitions> {
        self.partitions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl ILocalStore for MemoryLocalStore {
    async fn initialize(&self) -> anyhow::Result<()> {
        let mut partitions = self.write();
        for partition in Partition::ALL {
            partitions.entry(partition).or_default();
        }
        Ok(())
    }

    async fn put(&self, partition: Partition, records: &[Record]) -> anyhow::Result<()> {
        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let id = record.identifier(partition).map_err(CacheError::from)?;
            rows.push((id, record.clone()));
        }

        self.write().entry(partition).or_default().extend(rows);
        Ok(())
    }

    async fn get(&self, partition: Partition, id: &RecordId) -> anyhow::Result<Option<Record>> {
        Ok(self
            .read()
            .get(&partition)
            .and_then(|records| records.get(id).cloned()))
    }

    async fn get_all(&self, partition: Partition) -> anyhow::Result<Vec<Record>> {
        Ok(self
            .read()
            .get(&partition)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn remove(&self, partition: Partition, ids: &[RecordId]) -> anyhow::Result<()> {
        if let Some(records) = self.write().get_mut(&partition) {
            for id in ids {
                records.remove(id);
            }
        }
        Ok(())
    }

    async fn clear(&self, partition: Partition) -> anyhow::Result<()> {
        if let Some(records) = self.write().get_mut(&partition) {
            records.clear();
        }
        Ok(())
    }

    async fn count(&self, partition: Partition) -> anyhow::Result<u64> {
        Ok(self.read().get(&partition).map_or(0, |r| r.len() as u64))
    }

    async fn quota_estimate(&self) -> anyhow::Result<Option<QuotaEstimate>> {
        Ok(None)
    }
}
