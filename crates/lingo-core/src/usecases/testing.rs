//! Hand-written port fakes shared by the use case tests

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use anyhow::anyhow;
use serde_json::Value;

use crate::domain::{Partition, QuotaEstimate, Record, RecordId, SyncBatch};
use crate::ports::{Ack, ContentResponse, ILocalStore, INotificationService, IRemoteApi, Notification};

pub fn record(value: Value) -> Record {
    Record::from_value(value).unwrap()
}

// ============================================================================
// Store
// ============================================================================

#[derive(Default)]
pub struct MemoryStore {
    partitions: Mutex<HashMap<Partition, BTreeMap<String, Record>>>,
    fail_writes: Mutex<bool>,
    fail_reads: Mutex<bool>,
    quota: Mutex<Option<QuotaEstimate>>,
    reads: Mutex<usize>,
    clears: Mutex<usize>,
}

impl MemoryStore {
    pub fn seed(&self, partition: Partition, records: Vec<Record>) {
        let mut partitions = self.partitions.lock().unwrap();
        let entries = partitions.entry(partition).or_default();
        for record in records {
            let id = record.identifier(partition).unwrap();
            entries.insert(id.as_str().to_string(), record);
        }
    }

    pub fn records(&self, partition: Partition) -> Vec<Record> {
        self.partitions
            .lock()
            .unwrap()
            .get(&partition)
            .map(|entries| entries.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    pub fn fail_reads(&self, fail: bool) {
        *self.fail_reads.lock().unwrap() = fail;
    }

    pub fn set_quota(&self, estimate: QuotaEstimate) {
        *self.quota.lock().unwrap() = Some(estimate);
    }

    pub fn read_count(&self) -> usize {
        *self.reads.lock().unwrap()
    }

    pub fn clear_count(&self) -> usize {
        *self.clears.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl ILocalStore for MemoryStore {
    async fn initialize(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn put(&self, partition: Partition, records: &[Record]) -> anyhow::Result<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(anyhow!("disk full"));
        }
        let mut partitions = self.partitions.lock().unwrap();
        let entries = partitions.entry(partition).or_default();
        for record in records {
            let id = record.identifier(partition)?;
            entries.insert(id.as_str().to_string(), record.clone());
        }
        Ok(())
    }

    async fn get(&self, partition: Partition, id: &RecordId) -> anyhow::Result<Option<Record>> {
        *self.reads.lock().unwrap() += 1;
        Ok(self
            .partitions
            .lock()
            .unwrap()
            .get(&partition)
            .and_then(|entries| entries.get(id.as_str()).cloned()))
    }

    async fn get_all(&self, partition: Partition) -> anyhow::Result<Vec<Record>> {
        *self.reads.lock().unwrap() += 1;
        if *self.fail_reads.lock().unwrap() {
            return Err(anyhow!("database is locked"));
        }
        Ok(self.records(partition))
    }

    async fn remove(&self, partition: Partition, ids: &[RecordId]) -> anyhow::Result<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(anyhow!("disk full"));
        }
        if let Some(entries) = self.partitions.lock().unwrap().get_mut(&partition) {
            for id in ids {
                entries.remove(id.as_str());
            }
        }
        Ok(())
    }

    async fn clear(&self, partition: Partition) -> anyhow::Result<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(anyhow!("disk full"));
        }
        *self.clears.lock().unwrap() += 1;
        self.partitions.lock().unwrap().remove(&partition);
        Ok(())
    }

    async fn quota_estimate(&self) -> anyhow::Result<Option<QuotaEstimate>> {
        Ok(*self.quota.lock().unwrap())
    }
}

// ============================================================================
// Remote
// ============================================================================

#[derive(Default)]
pub struct ScriptedRemote {
    content: Mutex<HashMap<Partition, Vec<Record>>>,
    unsuccessful: Mutex<Vec<Partition>>,
    downloads_fail: bool,
    progress_fails: Mutex<bool>,
    full_sync_fails: Mutex<bool>,
    full_sync_rejection: Mutex<Option<String>>,
    download_order: Mutex<Vec<Partition>>,
    sync_calls: Mutex<Vec<String>>,
    pushed_progress: Mutex<Vec<Vec<Record>>>,
    batches: Mutex<Vec<SyncBatch>>,
}

impl ScriptedRemote {
    /// A remote whose content endpoint is unreachable
    pub fn failing_downloads() -> Self {
        Self {
            downloads_fail: true,
            ..Self::default()
        }
    }

    pub fn set_content(&self, partition: Partition, records: Vec<Record>) {
        self.content.lock().unwrap().insert(partition, records);
    }

    pub fn set_unsuccessful(&self, partition: Partition) {
        self.unsuccessful.lock().unwrap().push(partition);
    }

    pub fn fail_progress_sync(&self, fail: bool) {
        *self.progress_fails.lock().unwrap() = fail;
    }

    pub fn fail_full_sync(&self, fail: bool) {
        *self.full_sync_fails.lock().unwrap() = fail;
    }

    pub fn reject_full_sync(&self, message: &str) {
        *self.full_sync_rejection.lock().unwrap() = Some(message.to_string());
    }

    pub fn download_order(&self) -> Vec<Partition> {
        self.download_order.lock().unwrap().clone()
    }

    pub fn sync_calls(&self) -> Vec<String> {
        self.sync_calls.lock().unwrap().clone()
    }

    pub fn pushed_progress(&self) -> Vec<Vec<Record>> {
        self.pushed_progress.lock().unwrap().clone()
    }

    pub fn last_batch(&self) -> Option<SyncBatch> {
        self.batches.lock().unwrap().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.download_order.lock().unwrap().len() + self.sync_calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl IRemoteApi for ScriptedRemote {
    async fn download_content(&self, partition: Partition) -> anyhow::Result<ContentResponse> {
        self.download_order.lock().unwrap().push(partition);
        if self.downloads_fail {
            return Err(anyhow!("connection refused"));
        }
        if self.unsuccessful.lock().unwrap().contains(&partition) {
            return Ok(ContentResponse {
                success: false,
                content: Vec::new(),
            });
        }
        let content = self
            .content
            .lock()
            .unwrap()
            .get(&partition)
            .cloned()
            .unwrap_or_default();
        Ok(ContentResponse {
            success: true,
            content,
        })
    }

    async fn sync_progress(&self, records: &[Record]) -> anyhow::Result<Ack> {
        self.sync_calls
            .lock()
            .unwrap()
            .push("sync_progress".to_string());
        if *self.progress_fails.lock().unwrap() {
            return Err(anyhow!("connection reset"));
        }
        self.pushed_progress.lock().unwrap().push(records.to_vec());
        Ok(Ack::ok())
    }

    async fn sync_all_data(&self, batch: &SyncBatch) -> anyhow::Result<Ack> {
        self.sync_calls
            .lock()
            .unwrap()
            .push("sync_all_data".to_string());
        if *self.full_sync_fails.lock().unwrap() {
            return Err(anyhow!("connection reset"));
        }
        if let Some(message) = self.full_sync_rejection.lock().unwrap().clone() {
            return Ok(Ack::rejected(message));
        }
        self.batches.lock().unwrap().push(batch.clone());
        Ok(Ack::ok())
    }
}

// ============================================================================
// Notifier
// ============================================================================

#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Notification>>,
    progress: Mutex<Vec<(String, f64)>>,
    banners: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn toast_categories(&self) -> Vec<String> {
        self.toasts
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.category.clone())
            .collect()
    }

    pub fn progress_values(&self) -> Vec<f64> {
        self.progress
            .lock()
            .unwrap()
            .iter()
            .map(|(_, fraction)| *fraction)
            .collect()
    }
}

#[async_trait::async_trait]
impl INotificationService for RecordingNotifier {
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()> {
        self.toasts.lock().unwrap().push(notification.clone());
        Ok(())
    }

    async fn show_banner(
        &self,
        banner_id: &str,
        _notification: &Notification,
    ) -> anyhow::Result<()> {
        self.banners.lock().unwrap().push(banner_id.to_string());
        Ok(())
    }

    async fn hide_banner(&self, banner_id: &str) -> anyhow::Result<()> {
        self.banners.lock().unwrap().retain(|b| b != banner_id);
        Ok(())
    }

    async fn show_progress(
        &self,
        progress_id: &str,
        _title: &str,
        fraction: f64,
    ) -> anyhow::Result<()> {
        self.progress
            .lock()
            .unwrap()
            .push((progress_id.to_string(), fraction));
        Ok(())
    }

    async fn clear_progress(&self, _progress_id: &str) -> anyhow::Result<()> {
        Ok(())
    }
}
