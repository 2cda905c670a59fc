//! Shutdown broadcast between the signal task and the HTTP server.

use tokio::sync::broadcast;

/// One-shot shutdown broadcast.
///
/// Receivers must subscribe before `trigger` to observe it; a receiver that
/// subscribed earlier keeps the signal buffered until it polls.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Notify every current subscriber. Returns how many were reached.
    pub fn trigger(&self) -> usize {
        self.tx.send(()).unwrap_or(0)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
