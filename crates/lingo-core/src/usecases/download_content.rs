//! Content download use case
//!
//! Populates the local store with learning content ahead of offline use.
//! Partitions are processed one after the other in the order given; a
//! partition whose remote fetch fails is filled with placeholder content
//! instead of being left empty. The download only ever upserts, it never
//! clears; the one exception is placeholder content, which is removed once
//! the remote delivers real records for that partition.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::domain::{placeholder, OfflineError, Partition, Record, RecordId};
use crate::ports::{ILocalStore, INotificationService, IRemoteApi, Notification};

use super::feedback;
use super::locks::PartitionLocks;

/// Progress indicator id used while downloading
pub const DOWNLOAD_PROGRESS_ID: &str = "download";

/// Where the records written to a partition came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// Records returned by the remote content API
    Remote,
    /// Locally generated placeholders, with the reason the remote failed
    Placeholder { reason: String },
}

/// Outcome for a single partition
#[derive(Debug, Clone)]
pub struct PartitionDownload {
    pub partition: Partition,
    pub source: ContentSource,
    /// Records written to the store
    pub records: usize,
    /// Remote records dropped because they lacked a usable identifier
    pub skipped: usize,
    /// Placeholder records removed because real content arrived
    pub placeholders_removed: usize,
}

/// Summary of a completed download
#[derive(Debug, Clone, Default)]
pub struct DownloadReport {
    pub partitions: Vec<PartitionDownload>,
    pub duration_ms: u64,
}

impl DownloadReport {
    /// Total records written across all partitions
    pub fn total_records(&self) -> usize {
        self.partitions.iter().map(|p| p.records).sum()
    }

    /// Partitions that fell back to placeholder content
    pub fn placeholder_partitions(&self) -> Vec<Partition> {
        self.partitions
            .iter()
            .filter(|p| matches!(p.source, ContentSource::Placeholder { .. }))
            .map(|p| p.partition)
            .collect()
    }
}

/// Use case for downloading partition content into the local store
pub struct DownloadContentUseCase {
    remote: Arc<dyn IRemoteApi>,
    store: Arc<dyn ILocalStore>,
    notifier: Arc<dyn INotificationService>,
    locks: Arc<PartitionLocks>,
}

impl DownloadContentUseCase {
    /// Creates a new DownloadContentUseCase with the required dependencies
    ///
    /// # Arguments
    ///
    /// * `remote` - Remote content API
    /// * `store` - Local partitioned store receiving the content
    /// * `notifier` - Progress and toast delivery
    /// * `locks` - Partition registry shared with the other use cases
    pub fn new(
        remote: Arc<dyn IRemoteApi>,
        store: Arc<dyn ILocalStore>,
        notifier: Arc<dyn INotificationService>,
        locks: Arc<PartitionLocks>,
    ) -> Self {
        Self {
            remote,
            store,
            notifier,
            locks,
        }
    }

    /// Downloads every partition in `partitions`, in order
    ///
    /// Progress is reported after each partition as
    /// `processed / partitions.len()`.
    ///
    /// # Errors
    ///
    /// - `OfflineError::Busy` if another operation holds one of the partitions
    /// - `OfflineError::StorageWriteFailed` if the store rejects a write; the
    ///   remaining partitions are not attempted
    #[tracing::instrument(skip_all, fields(total = partitions.len()))]
    pub async fn execute(&self, partitions: &[Partition]) -> Result<DownloadReport, OfflineError> {
        let _guard = self.locks.try_acquire("download", partitions)?;
        let start = Instant::now();
        let total = partitions.len();
        let mut report = DownloadReport::default();

        info!(total, "Starting content download");

        for (index, partition) in partitions.iter().copied().enumerate() {
            let outcome = match self.download_partition(partition).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    feedback::clear_progress(self.notifier.as_ref(), DOWNLOAD_PROGRESS_ID).await;
                    feedback::toast(
                        self.notifier.as_ref(),
                        Notification::error("Download failed", err.to_string()),
                    )
                    .await;
                    return Err(err);
                }
            };
            report.partitions.push(outcome);

            let fraction = (index + 1) as f64 / total as f64;
            feedback::progress(
                self.notifier.as_ref(),
                DOWNLOAD_PROGRESS_ID,
                &format!("Downloaded {partition}"),
                fraction,
            )
            .await;
        }

        feedback::clear_progress(self.notifier.as_ref(), DOWNLOAD_PROGRESS_ID).await;
        report.duration_ms = start.elapsed().as_millis() as u64;

        let fallbacks = report.placeholder_partitions();
        let body = if fallbacks.is_empty() {
            format!("{} records available offline", report.total_records())
        } else {
            let names: Vec<&str> = fallbacks.iter().map(Partition::as_str).collect();
            format!(
                "{} records available offline (placeholder content for: {})",
                report.total_records(),
                names.join(", ")
            )
        };
        feedback::toast(
            self.notifier.as_ref(),
            Notification::download("Content downloaded", body),
        )
        .await;

        info!(
            records = report.total_records(),
            placeholders = fallbacks.len(),
            duration_ms = report.duration_ms,
            "Content download completed"
        );

        Ok(report)
    }

    /// Fetches one partition and writes it to the store
    async fn download_partition(
        &self,
        partition: Partition,
    ) -> Result<PartitionDownload, OfflineError> {
        let (records, source, skipped) = match self.fetch_remote(partition).await {
            Ok((records, skipped)) => (records, ContentSource::Remote, skipped),
            Err(err) => {
                warn!(%partition, error = %err, "Remote content unavailable, using placeholders");
                let records = placeholder::generate(partition);
                (
                    records,
                    ContentSource::Placeholder {
                        reason: err.to_string(),
                    },
                    0,
                )
            }
        };

        if !records.is_empty() {
            self.store
                .put(partition, &records)
                .await
                .map_err(|e| OfflineError::StorageWriteFailed {
                    partition,
                    reason: format!("{e:#}"),
                })?;
        }

        let placeholders_removed = if source == ContentSource::Remote && !records.is_empty() {
            self.remove_placeholders(partition).await?
        } else {
            0
        };

        info!(
            %partition,
            records = records.len(),
            placeholders_removed,
            source = ?source,
            "Partition stored"
        );

        Ok(PartitionDownload {
            partition,
            source,
            records: records.len(),
            skipped,
            placeholders_removed,
        })
    }

    /// Drops earlier fallback records once the remote has delivered content
    ///
    /// Only records tagged synthetic are touched.
    async fn remove_placeholders(&self, partition: Partition) -> Result<usize, OfflineError> {
        let stored = self
            .store
            .get_all(partition)
            .await
            .map_err(|e| OfflineError::StorageReadFailed {
                partition,
                reason: format!("{e:#}"),
            })?;
        let ids: Vec<RecordId> = stored
            .iter()
            .filter(|r| r.is_synthetic())
            .filter_map(|r| r.identifier(partition).ok())
            .collect();
        if ids.is_empty() {
            return Ok(0);
        }

        self.store
            .remove(partition, &ids)
            .await
            .map_err(|e| OfflineError::StorageWriteFailed {
                partition,
                reason: format!("{e:#}"),
            })?;
        debug!(%partition, removed = ids.len(), "Placeholder content replaced");
        Ok(ids.len())
    }

    /// Fetches remote records, dropping those without a usable identifier
    ///
    /// Returns the kept records and the number dropped.
    async fn fetch_remote(&self, partition: Partition) -> Result<(Vec<Record>, usize), OfflineError> {
        let response = self
            .remote
            .download_content(partition)
            .await
            .map_err(|e| OfflineError::RemoteFetchFailed(format!("{e:#}")))?;

        if !response.success {
            return Err(OfflineError::RemoteAckMissing(format!(
                "content request for '{partition}' reported failure"
            )));
        }

        let total = response.content.len();
        let records: Vec<Record> = response
            .content
            .into_iter()
            .filter(|record| match record.identifier(partition) {
                Ok(_) => true,
                Err(err) => {
                    warn!(%partition, error = %err, "Skipping remote record");
                    false
                }
            })
            .collect();
        let skipped = total - records.len();

        Ok((records, skipped))
    }
}
