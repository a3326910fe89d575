//! End-to-end offline scenario
//!
//! Download while the remote is down, record progress offline, reconnect,
//! and check that exactly one sync pushes the learner's data and resets
//! `progress`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use serde_json::json;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use lingo_cache::MemoryLocalStore;
use lingo_core::domain::{ConnectivityState, Partition, Record, SyncBatch};
use lingo_core::ports::{Ack, ContentResponse, ILocalStore, IRemoteApi};
use lingo_core::usecases::{
    DownloadContentUseCase, PartitionLocks, SyncOutcome, SynchronizeUseCase,
};
use lingo_sync::{ConnectivityEvent, ConnectivityMonitor, TracingNotifier};

// ============================================================================
// Test helpers
// ============================================================================

/// Remote whose content endpoint is down and whose sync endpoints record pushes
#[derive(Default)]
struct FlakyRemote {
    progress_pushes: Mutex<Vec<Vec<Record>>>,
    batches: Mutex<Vec<SyncBatch>>,
}

#[async_trait::async_trait]
impl IRemoteApi for FlakyRemote {
    async fn download_content(&self, _partition: Partition) -> anyhow::Result<ContentResponse> {
        Err(anyhow!("network unreachable"))
    }

    async fn sync_progress(&self, records: &[Record]) -> anyhow::Result<Ack> {
        self.progress_pushes.lock().unwrap().push(records.to_vec());
        Ok(Ack::ok())
    }

    async fn sync_all_data(&self, batch: &SyncBatch) -> anyhow::Result<Ack> {
        self.batches.lock().unwrap().push(batch.clone());
        Ok(Ack::ok())
    }
}

struct Harness {
    store: Arc<MemoryLocalStore>,
    remote: Arc<FlakyRemote>,
    monitor: Arc<ConnectivityMonitor>,
    download: DownloadContentUseCase,
    sync: Arc<SynchronizeUseCase>,
}

async fn harness() -> Harness {
    let store = Arc::new(MemoryLocalStore::new());
    store.initialize().await.unwrap();
    let remote = Arc::new(FlakyRemote::default());
    let notifier = Arc::new(TracingNotifier::new());
    let locks = PartitionLocks::new();
    let monitor = Arc::new(ConnectivityMonitor::new(
        ConnectivityState::Offline,
        notifier.clone(),
    ));

    let download = DownloadContentUseCase::new(
        remote.clone(),
        store.clone(),
        notifier.clone(),
        Arc::clone(&locks),
    );
    let sync = Arc::new(SynchronizeUseCase::new(
        remote.clone(),
        store.clone(),
        monitor.clone(),
        notifier,
        locks,
    ));

    Harness {
        store,
        remote,
        monitor,
        download,
        sync,
    }
}

// ============================================================================
// Scenario
// ============================================================================

#[tokio::test]
async fn test_offline_session_then_reconnect() {
    let h = harness().await;

    // Remote down: every partition falls back to placeholders.
    let report = h.download.execute(&Partition::DOWNLOADABLE).await.unwrap();
    assert_eq!(report.placeholder_partitions(), Partition::DOWNLOADABLE.to_vec());
    for partition in Partition::DOWNLOADABLE {
        let count = h.store.count(partition).await.unwrap();
        assert!(
            (5..=15).contains(&count),
            "{partition} holds {count} placeholder records"
        );
    }

    // Learner finishes a lesson while offline.
    let progress = Record::from_value(json!({
        "id": "progress-greetings",
        "lessonId": "placeholder-lesson-1",
        "completed": true,
        "score": 95
    }))
    .unwrap();
    h.store.put(Partition::Progress, &[progress]).await.unwrap();

    // A manual sync while offline does nothing.
    assert_eq!(h.sync.execute().await.unwrap(), SyncOutcome::SkippedOffline);
    assert!(h.remote.batches.lock().unwrap().is_empty());

    // Network returns.
    let (tx, rx) = mpsc::channel(8);
    tx.send(ConnectivityEvent::WentOnline).await.unwrap();
    drop(tx);
    tokio::time::timeout(
        Duration::from_secs(5),
        h.monitor.run(rx, h.sync.clone(), CancellationToken::new()),
    )
    .await
    .expect("monitor should stop once the channel closes")
    .unwrap();

    assert_eq!(h.monitor.state(), ConnectivityState::Online);

    let pushes = h.remote.progress_pushes.lock().unwrap().clone();
    assert_eq!(pushes.len(), 1);
    assert_eq!(pushes[0].len(), 1);
    assert_eq!(pushes[0][0].get("score"), Some(&json!(95)));

    let batches = h.remote.batches.lock().unwrap().clone();
    assert_eq!(batches.len(), 1);
    assert!(batches[0].activities.is_empty(), "placeholders stay local");
    assert!(batches[0].vocabulary.is_empty(), "placeholders stay local");

    assert_eq!(h.store.count(Partition::Progress).await.unwrap(), 0);
    assert!(h.store.count(Partition::Lessons).await.unwrap() > 0);
    assert!(h.store.count(Partition::Vocabulary).await.unwrap() > 0);
    assert!(h.store.count(Partition::Activities).await.unwrap() > 0);
}

#[tokio::test]
async fn test_repeated_online_signal_syncs_once() {
    let h = harness().await;
    let (tx, rx) = mpsc::channel(8);
    let cancel = CancellationToken::new();

    let monitor = h.monitor.clone();
    let sync = h.sync.clone();
    let task = {
        let cancel = cancel.clone();
        tokio::spawn(async move { monitor.run(rx, sync, cancel).await })
    };

    tx.send(ConnectivityEvent::WentOnline).await.unwrap();
    tx.send(ConnectivityEvent::WentOnline).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel.cancel();
    task.await.unwrap().unwrap();

    assert_eq!(h.remote.batches.lock().unwrap().len(), 1);
}
