//! Registry of in-flight readings with per-reading cancel handles.

use dashmap::DashMap;
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

/// Thread-safe map of active readings. Each entry holds the sender side
/// of that reading's cancellation signal.
#[derive(Default)]
pub struct ReadingRegistry {
    active: DashMap<Uuid, watch::Sender<bool>>,
}

impl ReadingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a reading and returns its cancellation receiver.
    pub fn register(&self, reading_id: Uuid) -> watch::Receiver<bool> {
        let (tx, rx) = watch::channel(false);
        self.active.insert(reading_id, tx);
        debug!(%reading_id, "reading registered");
        rx
    }

    /// Signals cancellation to a reading's tasks. Returns false when the
    /// reading is unknown or already finished.
    pub fn cancel(&self, reading_id: Uuid) -> bool {
        match self.active.get(&reading_id) {
            Some(entry) => {
                let _ = entry.send(true);
                debug!(%reading_id, "reading cancelled");
                true
            }
            None => false,
        }
    }

    /// Removes a finished reading. Called on every exit path.
    pub fn finish(&self, reading_id: Uuid) {
        self.active.remove(&reading_id);
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self, reading_id: Uuid) -> bool {
        self.active.contains_key(&reading_id)
    }
}
