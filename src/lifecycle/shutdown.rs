//! Shutdown coordination.
//!
//! One `Shutdown` handle is shared by `main`, the signal handler and tests.
//! The listener and the metrics upkeep task each hold a `ShutdownSignal`.

use tokio::sync::broadcast;

/// Broadcasts the shutdown request to every subscribed task.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe a task. Subscriptions taken after `trigger` never fire, so
    /// every task subscribes before the signal handler starts.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
            fired: false,
        }
    }

    /// Ask every subscribed task to stop. Returns how many were notified.
    pub fn trigger(&self) -> usize {
        let notified = self.tx.send(()).unwrap_or(0);
        tracing::debug!(notified, "Shutdown triggered");
        notified
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// A task's view of the shutdown request.
pub struct ShutdownSignal {
    rx: broadcast::Receiver<()>,
    fired: bool,
}

impl ShutdownSignal {
    /// Wait until shutdown is triggered.
    ///
    /// Dropping every `Shutdown` handle also counts as a trigger. Once this
    /// has resolved, later calls resolve immediately.
    pub async fn recv(&mut self) {
        if !self.fired {
            let _ = self.rx.recv().await;
            self.fired = true;
        }
    }
}
