//! `INotificationService` adapter that writes user feedback to the log
//!
//! Used by headless runs (`lingo watch`). Active banners are remembered so
//! hiding an unknown banner stays a no-op.

use std::collections::BTreeSet;
use std::sync::Mutex;

use tracing::{debug, info, warn};

use lingo_core::ports::{INotificationService, Notification, NotificationPriority};

/// Logs notifications through `tracing`
#[derive(Debug, Default)]
pub struct TracingNotifier {
    banners: Mutex<BTreeSet<String>>,
}

impl TracingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of banners currently shown
    pub fn active_banners(&self) -> Vec<String> {
        self.banners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl INotificationService for TracingNotifier {
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()> {
        match notification.priority {
            NotificationPriority::High => warn!(
                category = %notification.category,
                title = %notification.title,
                "{}",
                notification.body
            ),
            NotificationPriority::Normal => info!(
                category = %notification.category,
                title = %notification.title,
                "{}",
                notification.body
            ),
            NotificationPriority::Low => debug!(
                category = %notification.category,
                title = %notification.title,
                "{}",
                notification.body
            ),
        }
        Ok(())
    }

    async fn show_banner(&self, banner_id: &str, notification: &Notification) -> anyhow::Result<()> {
        let inserted = self
            .banners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(banner_id.to_string());
        if inserted {
            warn!(banner = banner_id, title = %notification.title, "{}", notification.body);
        }
        Ok(())
    }

    async fn hide_banner(&self, banner_id: &str) -> anyhow::Result<()> {
        let removed = self
            .banners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(banner_id);
        if removed {
            info!(banner = banner_id, "Banner hidden");
        }
        Ok(())
    }

    async fn show_progress(&self, progress_id: &str, title: &str, fraction: f64) -> anyhow::Result<()> {
        let percent = (fraction.clamp(0.0, 1.0) * 100.0).round() as u8;
        info!(progress = progress_id, percent, "{title}");
        Ok(())
    }

    async fn clear_progress(&self, progress_id: &str) -> anyhow::Result<()> {
        debug!(progress = progress_id, "Progress cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_core::ports::OFFLINE_BANNER_ID;

    #[tokio::test]
    async fn test_banner_lifecycle() {
        let notifier = TracingNotifier::new();
        let banner = Notification::offline_banner();

        notifier.show_banner(OFFLINE_BANNER_ID, &banner).await.unwrap();
        notifier.show_banner(OFFLINE_BANNER_ID, &banner).await.unwrap();
        assert_eq!(notifier.active_banners(), vec![OFFLINE_BANNER_ID.to_string()]);

        notifier.hide_banner(OFFLINE_BANNER_ID).await.unwrap();
        notifier.hide_banner(OFFLINE_BANNER_ID).await.unwrap();
        assert!(notifier.active_banners().is_empty());
    }

    #[tokio::test]
    async fn test_toasts_and_progress_never_fail() {
        let notifier = TracingNotifier::new();
        notifier
            .notify(&Notification::error("Sync failed", "timeout"))
            .await
            .unwrap();
        notifier.show_progress("sync", "Halfway", 0.5).await.unwrap();
        notifier.show_progress("sync", "Overshoot", 3.0).await.unwrap();
        notifier.clear_progress("sync").await.unwrap();
    }
}
