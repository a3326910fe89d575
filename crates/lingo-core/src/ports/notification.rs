//! Notification service port (driven/secondary port)
//!
//! This module defines the interface for user-visible feedback: one-shot
//! toasts after a download or sync, the dismissible banner shown while
//! offline, and progress indicators for long operations.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because delivery is adapter-specific.
//! - Notifications are fire-and-forget; callers log delivery failures and
//!   carry on, a failed toast never fails the operation it reports.
//! - Banners and progress indicators are addressed by id so they can be
//!   updated and removed.

use serde::{Deserialize, Serialize};

/// Banner id used while the network is unreachable
pub const OFFLINE_BANNER_ID: &str = "offline";

/// Priority level for a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPriority {
    /// Low priority, may not be shown immediately
    Low,
    /// Normal priority
    #[default]
    Normal,
    /// High priority, shown prominently
    High,
}

impl std::fmt::Display for NotificationPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NotificationPriority::Low => "low",
            NotificationPriority::Normal => "normal",
            NotificationPriority::High => "high",
        };
        write!(f, "{}", s)
    }
}

/// A notification to display to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Title of the notification (short, descriptive)
    pub title: String,
    /// Body text with details about the event
    pub body: String,
    /// Priority level affecting how the notification is displayed
    pub priority: NotificationPriority,
    /// Category for grouping/filtering (e.g., "download", "sync", "connectivity")
    pub category: String,
}

impl Notification {
    /// Creates a new notification with the given title and body
    ///
    /// Uses `Normal` priority and an empty category by default.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            priority: NotificationPriority::Normal,
            category: String::new(),
        }
    }

    /// Sets the priority level
    pub fn with_priority(mut self, priority: NotificationPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Creates a download-related notification
    pub fn download(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(title, body).with_category("download")
    }

    /// Creates a sync-related notification
    pub fn sync(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(title, body).with_category("sync")
    }

    /// Creates an error notification with High priority
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(title, body)
            .with_priority(NotificationPriority::High)
            .with_category("error")
    }

    /// The banner shown while offline
    pub fn offline_banner() -> Self {
        Self::new(
            "You are offline",
            "Cached lessons remain available. Progress will sync when you reconnect.",
        )
        .with_priority(NotificationPriority::High)
        .with_category("connectivity")
    }
}

/// Port trait for user-visible feedback
///
/// ## Implementation Notes
///
/// - `notify` sends a one-shot toast.
/// - `show_banner` / `hide_banner` manage a persistent banner by id;
///   hiding a banner that is not shown is a no-op.
/// - `show_progress` creates or updates an indicator; `fraction` ranges
///   from 0.0 to 1.0.
#[async_trait::async_trait]
pub trait INotificationService: Send + Sync {
    /// Sends a one-shot notification to the user
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()>;

    /// Shows a persistent banner
    async fn show_banner(&self, banner_id: &str, notification: &Notification)
        -> anyhow::Result<()>;

    /// Removes a persistent banner
    async fn hide_banner(&self, banner_id: &str) -> anyhow::Result<()>;

    /// Shows or updates a progress indicator
    async fn show_progress(&self, progress_id: &str, title: &str, fraction: f64)
        -> anyhow::Result<()>;

    /// Clears (removes) a progress indicator
    async fn clear_progress(&self, progress_id: &str) -> anyhow::Result<()>;
}
