use crate::domain::model::Notification;
use crate::domain::ports::Notifier;
use std::sync::{Arc, Mutex};

/// Sends notifications to the log and to the terminal.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier {
    echo: bool,
}

impl TracingNotifier {
    pub fn new(echo: bool) -> Self {
        Self { echo }
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        if notification.is_error {
            tracing::warn!("❌ {}: {}", notification.title, notification.description);
            if self.echo {
                eprintln!("❌ {}: {}", notification.title, notification.description);
            }
        } else {
            tracing::info!("✅ {}: {}", notification.title, notification.description);
            if self.echo {
                println!("✅ {}: {}", notification.title, notification.description);
            }
        }
    }
}

/// Keeps every notification in memory; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notification> {
        self.sent.lock().ok().and_then(|sent| sent.last().cloned())
    }

    pub fn len(&self) -> usize {
        self.sent.lock().map(|sent| sent.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(notification);
        }
    }
}
