//! Explicit mutual exclusion between store operations
//!
//! Download, sync and clear each claim the partitions they touch for the
//! whole run. A second operation that needs a claimed partition fails fast
//! with [`OfflineError::Busy`] instead of racing the first one. Claims are
//! released when the returned guard is dropped.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::domain::{OfflineError, Partition};

/// Shared registry of claimed partitions
#[derive(Debug, Default)]
pub struct PartitionLocks {
    held: Mutex<HashMap<Partition, &'static str>>,
}

impl PartitionLocks {
    /// Creates an empty registry, ready to be shared between use cases
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn held(&self) -> MutexGuard<'_, HashMap<Partition, &'static str>> {
        // The map stays consistent even if a holder panicked mid-update.
        self.held.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Claims every partition in `partitions` for `operation`, or none of them
    ///
    /// # Errors
    /// Returns `OfflineError::Busy` naming the first contended partition
    pub fn try_acquire(
        self: &Arc<Self>,
        operation: &'static str,
        partitions: &[Partition],
    ) -> Result<PartitionGuard, OfflineError> {
        let mut held = self.held();

        if let Some((partition, holder)) = partitions
            .iter()
            .find_map(|p| held.get(p).map(|holder| (*p, *holder)))
        {
            debug!(%partition, holder, operation, "Partition busy");
            return Err(OfflineError::Busy {
                operation: holder,
                partition,
            });
        }

        let mut claimed = Vec::with_capacity(partitions.len());
        for partition in partitions {
            if held.insert(*partition, operation).is_none() {
                claimed.push(*partition);
            }
        }

        Ok(PartitionGuard {
            locks: Arc::clone(self),
            partitions: claimed,
        })
    }

    /// Returns the operation currently holding `partition`, if any
    pub fn holder(&self, partition: Partition) -> Option<&'static str> {
        self.held().get(&partition).copied()
    }

    /// Returns true if no partition is claimed
    pub fn is_idle(&self) -> bool {
        self.held().is_empty()
    }
}

/// Releases its partitions on drop
#[derive(Debug)]
pub struct PartitionGuard {
    locks: Arc<PartitionLocks>,
    partitions: Vec<Partition>,
}

impl PartitionGuard {
    /// Partitions held by this guard
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }
}

impl Drop for PartitionGuard {
    fn drop(&mut self) {
        let mut held = self.locks.held();
        for partition in &self.partitions {
            held.remove(partition);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disjoint_claims_coexist() {
        let locks = PartitionLocks::new();
        let _a = locks.try_acquire("clear", &[Partition::Lessons]).unwrap();
        let _b = locks.try_acquire("clear", &[Partition::Vocabulary]).unwrap();
        assert_eq!(locks.holder(Partition::Lessons), Some("clear"));
        assert_eq!(locks.holder(Partition::Progress), None);
    }

    #[test]
    fn test_overlapping_claim_is_busy() {
        let locks = PartitionLocks::new();
        let _sync = locks
            .try_acquire("sync", &Partition::SYNCED)
            .unwrap();

        let err = locks
            .try_acquire("clear", &[Partition::Progress])
            .unwrap_err();
        match err {
            OfflineError::Busy {
                operation,
                partition,
            } => {
                assert_eq!(operation, "sync");
                assert_eq!(partition, Partition::Progress);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_failed_claim_takes_nothing() {
        let locks = PartitionLocks::new();
        let _held = locks.try_acquire("clear", &[Partition::Activities]).unwrap();
        assert!(locks
            .try_acquire("download", &Partition::DOWNLOADABLE)
            .is_err());
        assert_eq!(locks.holder(Partition::Lessons), None);
    }

    #[test]
    fn test_drop_releases() {
        let locks = PartitionLocks::new();
        {
            let guard = locks.try_acquire("download", &Partition::DOWNLOADABLE).unwrap();
            assert_eq!(guard.partitions().len(), 4);
            assert!(!locks.is_idle());
        }
        assert!(locks.is_idle());
        assert!(locks.try_acquire("sync", &Partition::SYNCED).is_ok());
    }

    #[test]
    fn test_duplicate_partitions_in_one_claim() {
        let locks = PartitionLocks::new();
        let guard = locks
            .try_acquire("download", &[Partition::Lessons, Partition::Lessons])
            .unwrap();
        assert_eq!(guard.partitions(), &[Partition::Lessons]);
        drop(guard);
        assert!(locks.is_idle());
    }
}
