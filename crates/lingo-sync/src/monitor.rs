//! Connectivity monitor - turns online/offline signals into user feedback and syncs
//!
//! The [`ConnectivityMonitor`] consumes [`ConnectivityEvent`]s from a channel
//! fed by whatever observes the network (the [`ReachabilityProbe`](crate::probe::ReachabilityProbe)
//! in the CLI, a test harness elsewhere).
//!
//! ## Flow
//!
//! ```text
//! probe ──→ mpsc::Receiver ──→ ConnectivityMonitor ──→ watch::Sender<ConnectivityState>
//!                                   │        │
//!                         offline banner    SyncTrigger (one at a time)
//! ```
//!
//! - `Online → Offline` shows the offline banner. Nothing in the store changes.
//! - `Offline → Online` hides the banner (unless the user dismissed it) and
//!   starts one background sync. A reconnect while that sync is still running
//!   is dropped, not queued.
//! - An event matching the current state is ignored.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use lingo_core::domain::{ConnectivityState, OfflineError};
use lingo_core::ports::{IConnectivity, INotificationService, Notification, OFFLINE_BANNER_ID};
use lingo_core::usecases::{SyncOutcome, SynchronizeUseCase};

use crate::MonitorError;

/// A network status change reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityEvent {
    WentOnline,
    WentOffline,
}

impl ConnectivityEvent {
    /// State the monitor moves to on this event
    pub fn target(self) -> ConnectivityState {
        match self {
            ConnectivityEvent::WentOnline => ConnectivityState::Online,
            ConnectivityEvent::WentOffline => ConnectivityState::Offline,
        }
    }

    /// Event announcing `state`
    pub fn announcing(state: ConnectivityState) -> Self {
        match state {
            ConnectivityState::Online => ConnectivityEvent::WentOnline,
            ConnectivityState::Offline => ConnectivityEvent::WentOffline,
        }
    }
}

/// Whatever runs when the network comes back
#[async_trait::async_trait]
pub trait SyncTrigger: Send + Sync + 'static {
    async fn sync(&self) -> Result<SyncOutcome, OfflineError>;
}

#[async_trait::async_trait]
impl SyncTrigger for SynchronizeUseCase {
    async fn sync(&self) -> Result<SyncOutcome, OfflineError> {
        self.execute().await
    }
}

/// What the monitor did with one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The event repeated the current state
    Ignored,
    WentOffline,
    /// `sync_started` is false when the trigger was coalesced into a running sync
    WentOnline { sync_started: bool },
}

/// Clears the in-flight flag when the sync task ends, even by panic
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Online/offline state machine
pub struct ConnectivityMonitor {
    state: watch::Sender<ConnectivityState>,
    banner_dismissed: AtomicBool,
    sync_in_flight: Arc<AtomicBool>,
    sync_task: Mutex<Option<JoinHandle<()>>>,
    notifier: Arc<dyn INotificationService>,
}

impl ConnectivityMonitor {
    /// Creates a monitor starting in `initial`
    pub fn new(initial: ConnectivityState, notifier: Arc<dyn INotificationService>) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state,
            banner_dismissed: AtomicBool::new(false),
            sync_in_flight: Arc::new(AtomicBool::new(false)),
            sync_task: Mutex::new(None),
            notifier,
        }
    }

    /// Current state
    pub fn state(&self) -> ConnectivityState {
        *self.state.borrow()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<ConnectivityState> {
        self.state.subscribe()
    }

    /// Returns true while a reconnect sync is running
    pub fn is_syncing(&self) -> bool {
        self.sync_in_flight.load(Ordering::Acquire)
    }

    /// Hides the offline banner until the next offline period
    ///
    /// Returns false if there was no banner to dismiss.
    pub async fn dismiss_banner(&self) -> bool {
        if self.state().is_online() || self.banner_dismissed.swap(true, Ordering::AcqRel) {
            return false;
        }
        info!("Offline banner dismissed");
        if let Err(err) = self.notifier.hide_banner(OFFLINE_BANNER_ID).await {
            debug!(error = %err, "Failed to hide offline banner");
        }
        true
    }

    /// Main event loop
    ///
    /// Returns once `cancel` fires or every sender of `events` is dropped,
    /// after waiting for a sync that is still running.
    pub async fn run(
        &self,
        mut events: mpsc::Receiver<ConnectivityEvent>,
        trigger: Arc<dyn SyncTrigger>,
        cancel: CancellationToken,
    ) -> Result<(), MonitorError> {
        info!(state = %self.state(), "Connectivity monitor starting");

        if !self.state().is_online() {
            self.show_banner().await;
        }

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Cancellation requested, connectivity monitor shutting down");
                    break;
                }
                event = events.recv() => {
                    match event {
                        Some(event) => {
                            self.handle_event(event, &trigger).await;
                        }
                        None => {
                            info!("Event channel closed, connectivity monitor shutting down");
                            break;
                        }
                    }
                }
            }
        }

        self.wait_for_sync().await?;
        info!("Connectivity monitor stopped");
        Ok(())
    }

    /// Applies one event
    pub async fn handle_event(
        &self,
        event: ConnectivityEvent,
        trigger: &Arc<dyn SyncTrigger>,
    ) -> Transition {
        let target = event.target();
        let previous = self.state();
        if previous == target {
            debug!(state = %target, "Connectivity unchanged, event ignored");
            return Transition::Ignored;
        }

        self.state.send_replace(target);
        info!(from = %previous, to = %target, "Connectivity changed");

        match target {
            ConnectivityState::Offline => {
                self.banner_dismissed.store(false, Ordering::Release);
                self.show_banner().await;
                Transition::WentOffline
            }
            ConnectivityState::Online => {
                if !self.banner_dismissed.swap(false, Ordering::AcqRel) {
                    if let Err(err) = self.notifier.hide_banner(OFFLINE_BANNER_ID).await {
                        debug!(error = %err, "Failed to hide offline banner");
                    }
                }
                Transition::WentOnline {
                    sync_started: self.start_sync(trigger),
                }
            }
        }
    }

    /// Waits for the running reconnect sync, if any
    pub async fn wait_for_sync(&self) -> Result<(), MonitorError> {
        let task = self
            .sync_task
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(task) = task {
            task.await
                .map_err(|e| MonitorError::SyncTaskFailed(e.to_string()))?;
        }
        Ok(())
    }

    async fn show_banner(&self) {
        if let Err(err) = self
            .notifier
            .show_banner(OFFLINE_BANNER_ID, &Notification::offline_banner())
            .await
        {
            debug!(error = %err, "Failed to show offline banner");
        }
    }

    fn start_sync(&self, trigger: &Arc<dyn SyncTrigger>) -> bool {
        if self
            .sync_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            info!("Sync already in flight, reconnect trigger dropped");
            return false;
        }

        let in_flight = InFlight(Arc::clone(&self.sync_in_flight));
        let trigger = Arc::clone(trigger);
        let task = tokio::spawn(async move {
            let _in_flight = in_flight;
            match trigger.sync().await {
                Ok(SyncOutcome::Completed(summary)) => info!(
                    progress = summary.progress_pushed,
                    activities = summary.activities_pushed,
                    vocabulary = summary.vocabulary_pushed,
                    "Reconnect sync completed"
                ),
                Ok(SyncOutcome::SkippedOffline) => {
                    info!("Reconnect sync skipped, offline again")
                }
                Err(err) => warn!(error = %err, "Reconnect sync failed"),
            }
        });

        *self
            .sync_task
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(task);
        true
    }
}

impl IConnectivity for ConnectivityMonitor {
    fn state(&self) -> ConnectivityState {
        ConnectivityMonitor::state(self)
    }
}

// ============================================================================
// Unit tests
// ============================================================================
