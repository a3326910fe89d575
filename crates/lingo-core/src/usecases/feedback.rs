//! Best-effort delivery of user feedback
//!
//! A toast or progress update that cannot be delivered is logged and
//! dropped; it never changes the outcome of the operation it reports.

use tracing::debug;

use crate::ports::{INotificationService, Notification};

pub(crate) async fn toast(notifier: &dyn INotificationService, notification: Notification) {
    if let Err(err) = notifier.notify(&notification).await {
        debug!(error = %err, title = %notification.title, "Failed to deliver notification");
    }
}

pub(crate) async fn progress(
    notifier: &dyn INotificationService,
    progress_id: &str,
    title: &str,
    fraction: f64,
) {
    if let Err(err) = notifier.show_progress(progress_id, title, fraction).await {
        debug!(error = %err, progress_id, "Failed to update progress indicator");
    }
}

pub(crate) async fn clear_progress(notifier: &dyn INotificationService, progress_id: &str) {
    if let Err(err) = notifier.clear_progress(progress_id).await {
        debug!(error = %err, progress_id, "Failed to clear progress indicator");
    }
}
