//! Global pause gate.
//!
//! A binary signal shared across tasks, open by default. It exists so an
//! application can hold outgoing traffic during a global cooldown. The client
//! never closes it and never waits on it; coordinating around it is up to the
//! caller.

use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct PauseGate {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for PauseGate {
    fn default() -> Self {
        Self::new()
    }
}

impl PauseGate {
    /// Create an open gate.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(true);
        Self { tx: Arc::new(tx) }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        *self.tx.borrow()
    }

    /// Hold traffic until [`PauseGate::open`] is called.
    pub fn close(&self) {
        self.tx.send_replace(false);
    }

    /// Release every task parked in [`PauseGate::wait_open`].
    pub fn open(&self) {
        self.tx.send_replace(true);
    }

    /// Resolve once the gate is open. Returns immediately if it already is.
    pub async fn wait_open(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        if rx.wait_for(|open| *open).await.is_err() {
            tracing::warn!("pause gate sender dropped while waiting");
        }
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
