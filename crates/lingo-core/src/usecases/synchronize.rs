//! Synchronization use case
//!
//! Pushes locally accumulated learner data to the remote source and
//! reconciles local state afterwards.
//!
//! ## Sync Flow
//!
//! 1. **Gate**: offline means no-op, no reads and no network calls
//! 2. **Read**: `progress`, `activities`, `vocabulary` in full
//! 3. **Progress push**: dedicated endpoint, only when there is progress
//! 4. **Batch push**: `SyncBatch` of all three groups to the full-sync endpoint
//! 5. **Reconcile**: clear `progress` only, and only after step 4 succeeded
//!
//! Any remote failure leaves every partition untouched so the same data is
//! retried on the next trigger. Placeholder records never leave the device.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{OfflineError, Partition, Record, SyncBatch};
use crate::ports::{Ack, IConnectivity, ILocalStore, INotificationService, IRemoteApi, Notification};

use super::feedback;
use super::locks::PartitionLocks;

/// Progress indicator id used while syncing
pub const SYNC_PROGRESS_ID: &str = "sync";

/// Counts for a completed synchronization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    /// Progress records sent to the progress endpoint
    pub progress_pushed: usize,
    /// Activity records included in the batch
    pub activities_pushed: usize,
    /// Vocabulary records included in the batch
    pub vocabulary_pushed: usize,
    /// Placeholder records withheld from the push
    pub synthetic_skipped: usize,
    /// Progress records removed locally after the push
    pub progress_cleared: usize,
    pub duration_ms: u64,
}

/// Result of a synchronization request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The network was unreachable; nothing was done
    SkippedOffline,
    /// Both pushes succeeded and `progress` was cleared
    Completed(SyncSummary),
}

/// Use case for pushing local learner data to the remote source
pub struct SynchronizeUseCase {
    remote: Arc<dyn IRemoteApi>,
    store: Arc<dyn ILocalStore>,
    connectivity: Arc<dyn IConnectivity>,
    notifier: Arc<dyn INotificationService>,
    locks: Arc<PartitionLocks>,
}

impl SynchronizeUseCase {
    /// Creates a new SynchronizeUseCase with the required dependencies
    pub fn new(
        remote: Arc<dyn IRemoteApi>,
        store: Arc<dyn ILocalStore>,
        connectivity: Arc<dyn IConnectivity>,
        notifier: Arc<dyn INotificationService>,
        locks: Arc<PartitionLocks>,
    ) -> Self {
        Self {
            remote,
            store,
            connectivity,
            notifier,
            locks,
        }
    }

    /// Runs one synchronization
    ///
    /// # Errors
    ///
    /// - `OfflineError::Busy` if a download or clear holds a synced partition
    /// - `OfflineError::StorageReadFailed` if a partition cannot be read
    /// - `OfflineError::RemoteFetchFailed` / `RemoteAckMissing` if either push
    ///   fails; nothing is cleared in that case
    /// - `OfflineError::StorageWriteFailed` if clearing `progress` fails after
    ///   a successful push (the records are pushed again next time)
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self) -> Result<SyncOutcome, OfflineError> {
        if !self.connectivity.is_online() {
            info!("Offline, skipping synchronization");
            return Ok(SyncOutcome::SkippedOffline);
        }

        let _guard = self.locks.try_acquire("sync", &Partition::SYNCED)?;

        match self.run().await {
            Ok(summary) => {
                feedback::clear_progress(self.notifier.as_ref(), SYNC_PROGRESS_ID).await;
                feedback::toast(
                    self.notifier.as_ref(),
                    Notification::sync(
                        "Sync complete",
                        format!(
                            "{} progress, {} activity and {} vocabulary records synced",
                            summary.progress_pushed,
                            summary.activities_pushed,
                            summary.vocabulary_pushed
                        ),
                    ),
                )
                .await;
                Ok(SyncOutcome::Completed(summary))
            }
            Err(err) => {
                warn!(error = %err, "Synchronization failed, local data kept for retry");
                feedback::clear_progress(self.notifier.as_ref(), SYNC_PROGRESS_ID).await;
                feedback::toast(
                    self.notifier.as_ref(),
                    Notification::error("Sync failed", err.to_string()),
                )
                .await;
                Err(err)
            }
        }
    }

    async fn run(&self) -> Result<SyncSummary, OfflineError> {
        let start = Instant::now();
        let mut summary = SyncSummary::default();

        let progress_all = self.read(Partition::Progress).await?;
        let progress_count = progress_all.len();
        let (progress, skipped) = without_synthetic(progress_all);
        summary.synthetic_skipped += skipped;
        let (activities, skipped) = without_synthetic(self.read(Partition::Activities).await?);
        summary.synthetic_skipped += skipped;
        let (vocabulary, skipped) = without_synthetic(self.read(Partition::Vocabulary).await?);
        summary.synthetic_skipped += skipped;

        info!(
            progress = progress.len(),
            activities = activities.len(),
            vocabulary = vocabulary.len(),
            synthetic_skipped = summary.synthetic_skipped,
            "Starting synchronization"
        );

        // Progress goes first so it is recorded even if the batch fails.
        if !progress.is_empty() {
            let ack = self
                .remote
                .sync_progress(&progress)
                .await
                .map_err(|e| OfflineError::RemoteFetchFailed(format!("{e:#}")))?;
            require_ack(ack, "progress sync")?;
            summary.progress_pushed = progress.len();
        }
        feedback::progress(
            self.notifier.as_ref(),
            SYNC_PROGRESS_ID,
            "Progress synced",
            0.5,
        )
        .await;

        summary.activities_pushed = activities.len();
        summary.vocabulary_pushed = vocabulary.len();
        let batch = SyncBatch::new(progress, activities, vocabulary);
        let ack = self
            .remote
            .sync_all_data(&batch)
            .await
            .map_err(|e| OfflineError::RemoteFetchFailed(format!("{e:#}")))?;
        require_ack(ack, "full sync")?;
        feedback::progress(self.notifier.as_ref(), SYNC_PROGRESS_ID, "All data synced", 1.0).await;

        self.store
            .clear(Partition::Progress)
            .await
            .map_err(|e| OfflineError::StorageWriteFailed {
                partition: Partition::Progress,
                reason: format!("{e:#}"),
            })?;
        summary.progress_cleared = progress_count;
        summary.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            progress_pushed = summary.progress_pushed,
            activities_pushed = summary.activities_pushed,
            vocabulary_pushed = summary.vocabulary_pushed,
            progress_cleared = summary.progress_cleared,
            duration_ms = summary.duration_ms,
            "Synchronization completed"
        );

        Ok(summary)
    }

    async fn read(&self, partition: Partition) -> Result<Vec<Record>, OfflineError> {
        self.store
            .get_all(partition)
            .await
            .map_err(|e| OfflineError::StorageReadFailed {
                partition,
                reason: format!("{e:#}"),
            })
    }
}

fn without_synthetic(records: Vec<Record>) -> (Vec<Record>, usize) {
    let total = records.len();
    let kept: Vec<Record> = records.into_iter().filter(|r| !r.is_synthetic()).collect();
    let skipped = total - kept.len();
    (kept, skipped)
}

fn require_ack(ack: Ack, phase: &str) -> Result<(), OfflineError> {
    if ack.success {
        Ok(())
    } else {
        Err(OfflineError::RemoteAckMissing(format!(
            "{phase}: {}",
            ack.message
                .unwrap_or_else(|| "remote reported failure".to_string())
        )))
    }
}
