//! # Cooperative Shutdown
//!
//! A cancellation signal shared by every concurrent activity in the branch.
//! Tasks hold a [`Shutdown`] and await it at their suspension points (inside
//! `tokio::select!`), so shutdown latency is bounded by the longest single
//! await, not by a polling interval.

use tokio::sync::watch;

/// Owning side of the shutdown signal.
///
/// Held by the command loop; triggered on EXIT.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

/// Subscribing side, one clone per task.
#[derive(Debug, Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

impl ShutdownHandle {
    /// Creates the signal and its first subscription.
    pub fn new() -> (ShutdownHandle, Shutdown) {
        let (tx, rx) = watch::channel(false);
        (ShutdownHandle { tx }, Shutdown { rx })
    }

    /// Adds another subscription.
    pub fn subscribe(&self) -> Shutdown {
        Shutdown {
            rx: self.tx.subscribe(),
        }
    }

    /// Triggers shutdown. Idempotent.
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }
}

impl Shutdown {
    /// Completes once shutdown has been triggered.
    ///
    /// A dropped handle also counts: an orphaned task must not outlive the
    /// runtime that spawned it.
    pub async fn triggered(&mut self) {
        if *self.rx.borrow() {
            return;
        }
        while self.rx.changed().await.is_ok() {
            if *self.rx.borrow() {
                return;
            }
        }
    }

    /// Non-blocking check, for callers between suspension points.
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trigger_releases_all_subscribers() {
        let (handle, mut first) = ShutdownHandle::new();
        let mut second = handle.subscribe();

        assert!(!first.is_triggered());
        handle.trigger();

        first.triggered().await;
        second.triggered().await;
        assert!(second.is_triggered());
    }

    #[tokio::test]
    async fn dropped_handle_counts_as_shutdown() {
        let (handle, mut shutdown) = ShutdownHandle::new();
        drop(handle);
        shutdown.triggered().await;
    }
}
