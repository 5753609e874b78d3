use crate::domain::model::{Coordinates, DraftProfile, Marker, Notification, ResolvedLocation};
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio::sync::watch;

/// Turns free-text place names into coordinates.
#[async_trait]
pub trait LocationResolver: Send + Sync {
    async fn resolve(&self, query: &str) -> Result<ResolvedLocation>;
}

/// Imperative operations of the map widget, handed to whoever needs them.
pub trait MapHandle: Send {
    fn fly_to(&mut self, center: Coordinates, zoom: f64);
    fn zoom_in(&mut self);
    fn zoom_out(&mut self);
    /// Current device position, if the widget can obtain one.
    fn locate(&mut self) -> Option<Coordinates>;
    fn show_markers(&mut self, markers: &[Marker]);
}

/// Fire-and-forget notification sink.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Progress updates (0..=100) emitted while a recognizer runs.
#[derive(Debug)]
pub struct ProgressReporter {
    tx: watch::Sender<u8>,
}

impl ProgressReporter {
    pub fn new(tx: watch::Sender<u8>) -> Self {
        Self { tx }
    }

    pub fn report(&self, percent: u8) {
        let percent = percent.min(100);
        // 進度只會往前走
        self.tx.send_if_modified(|current| {
            if percent > *current {
                *current = percent;
                true
            } else {
                false
            }
        });
    }

    pub fn current(&self) -> u8 {
        *self.tx.borrow()
    }

    pub fn reset(&self) {
        self.tx.send_replace(0);
    }

    pub fn subscribe(&self) -> watch::Receiver<u8> {
        self.tx.subscribe()
    }
}

/// Turns a recorded voice introduction into a draft profile.
#[async_trait]
pub trait ProfileRecognizer: Send + Sync {
    async fn recognize(&self, progress: &ProgressReporter) -> Result<DraftProfile>;
}
