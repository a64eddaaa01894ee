//! Shutdown coordination for the watchdog.

use tokio::sync::broadcast;

/// Coordinator for signal-driven shutdown.
///
/// Wraps a broadcast channel the long-running loops subscribe to. Triggering
/// is idempotent; subscribers see at most one notification.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
