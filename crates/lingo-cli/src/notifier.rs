//! Terminal notifier
//!
//! Shows toasts, banners and progress on stderr so stdout stays reserved
//! for command output. In JSON mode only failures are printed.

use std::collections::HashSet;
use std::sync::Mutex;

use lingo_core::ports::{INotificationService, Notification, NotificationPriority};

use crate::output::OutputFormat;

pub struct TerminalNotifier {
    format: OutputFormat,
    banners: Mutex<HashSet<String>>,
}

impl TerminalNotifier {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            banners: Mutex::new(HashSet::new()),
        }
    }

    fn quiet(&self, priority: NotificationPriority) -> bool {
        self.format.is_json() && priority != NotificationPriority::High
    }
}

fn progress_bar(fraction: f64) -> String {
    const WIDTH: usize = 20;
    let filled = (fraction.clamp(0.0, 1.0) * WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(WIDTH - filled))
}

#[async_trait::async_trait]
impl INotificationService for TerminalNotifier {
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()> {
        if self.quiet(notification.priority) {
            return Ok(());
        }
        let marker = match notification.priority {
            NotificationPriority::High => "\u{2717}",
            NotificationPriority::Normal => "\u{2713}",
            NotificationPriority::Low => "-",
        };
        eprintln!("{marker} {}: {}", notification.title, notification.body);
        Ok(())
    }

    async fn show_banner(&self, banner_id: &str, notification: &Notification) -> anyhow::Result<()> {
        let inserted = self
            .banners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(banner_id.to_string());
        if inserted && !self.format.is_json() {
            eprintln!("\u{26a0} {}: {}", notification.title, notification.body);
        }
        Ok(())
    }

    async fn hide_banner(&self, banner_id: &str) -> anyhow::Result<()> {
        let removed = self
            .banners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(banner_id);
        if removed && !self.format.is_json() {
            eprintln!("\u{2713} Back online");
        }
        Ok(())
    }

    async fn show_progress(&self, _progress_id: &str, title: &str, fraction: f64) -> anyhow::Result<()> {
        if !self.format.is_json() {
            eprintln!("{} {title}", progress_bar(fraction));
        }
        Ok(())
    }

    async fn clear_progress(&self, _progress_id: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0), format!("[{}]", "-".repeat(20)));
        assert_eq!(progress_bar(0.5), format!("[{}{}]", "#".repeat(10), "-".repeat(10)));
        assert_eq!(progress_bar(7.0), format!("[{}]", "#".repeat(20)));
    }

    #[tokio::test]
    async fn test_banner_tracking() {
        let notifier = TerminalNotifier::new(OutputFormat::Json);
        let banner = Notification::offline_banner();
        notifier.show_banner("offline", &banner).await.unwrap();
        notifier.show_banner("offline", &banner).await.unwrap();
        assert_eq!(notifier.banners.lock().unwrap().len(), 1);
        notifier.hide_banner("offline").await.unwrap();
        notifier.hide_banner("offline").await.unwrap();
        assert!(notifier.banners.lock().unwrap().is_empty());
    }
}
