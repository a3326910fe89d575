//! Lingo Sync - Connectivity monitoring and sync triggering
//!
//! Provides:
//! - A channel-fed connectivity monitor that shows the offline banner and
//!   starts a sync when the network comes back
//! - A TCP reachability probe that feeds the monitor from a real host
//! - A notification adapter that writes user feedback to the log
//!
//! ## Modules
//!
//! - [`monitor`] - Online/offline state machine with coalesced sync triggers
//! - [`probe`] - Periodic reachability checks against the API host
//! - [`notifier`] - `INotificationService` backed by `tracing`

pub mod monitor;
pub mod notifier;
pub mod probe;

pub use monitor::{ConnectivityEvent, ConnectivityMonitor, SyncTrigger, Transition};
pub use notifier::TracingNotifier;
pub use probe::ReachabilityProbe;

use thiserror::Error;

/// Errors that can occur while monitoring connectivity
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The monitor stopped listening for events
    #[error("Connectivity event channel closed")]
    ChannelClosed,

    /// The probe target could not be derived from the configured URL
    #[error("Invalid probe target: {0}")]
    InvalidTarget(String),

    /// The probe interval or timeout is zero
    #[error("Invalid probe schedule: {0}")]
    InvalidSchedule(String),

    /// A background sync task panicked or was aborted
    #[error("Sync task failed: {0}")]
    SyncTaskFailed(String),
}
