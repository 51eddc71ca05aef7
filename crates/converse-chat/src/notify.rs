//! External alert-presentation boundary.

use std::sync::Mutex;

use converse_core::types::Notification;

/// Receives failure notifications for user-visible alerting.
///
/// The pipeline decides when and with what content to notify; how the
/// alert is rendered (toast, dialog, terminal line) is the sink's concern.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Sink that routes notifications through `tracing` and stderr.
#[derive(Debug, Default)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notification: Notification) {
        tracing::error!(
            severity = ?notification.severity,
            title = %notification.title,
            "{}",
            notification.description
        );
        eprintln!("[{}] {}", notification.title, notification.description);
    }
}

/// Sink that records every notification, for tests.
#[derive(Debug, Default)]
pub struct RecordingNotificationSink {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications received so far, in order.
    pub fn received(&self) -> Vec<Notification> {
        self.received.lock().expect("sink mutex poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.received.lock().expect("sink mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for RecordingNotificationSink {
    fn notify(&self, notification: Notification) {
        self.received
            .lock()
            .expect("sink mutex poisoned")
            .push(notification);
    }
}
