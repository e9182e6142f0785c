//! # Autosave Task
//!
//! Periodic snapshots, independent of mutation activity. A save failure is
//! logged and retried at the next tick rather than taking the branch down -
//! the final shutdown snapshot is the one with a hard error path.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::engine::StateEngine;
use crate::shutdown::Shutdown;

/// Interval between automatic snapshots.
pub const AUTOSAVE_TICK: Duration = Duration::from_millis(800);

/// The autosave task. Runs until shutdown is triggered.
pub struct Autosave {
    engine: StateEngine,
    shutdown: Shutdown,
}

impl Autosave {
    pub fn new(engine: StateEngine, shutdown: Shutdown) -> Self {
        Autosave { engine, shutdown }
    }

    pub async fn run(mut self) {
        let mut tick = tokio::time::interval(AUTOSAVE_TICK);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    if let Err(e) = self.engine.save().await {
                        error!(error = %e, "Autosave failed");
                    }
                }
                _ = self.shutdown.triggered() => {
                    info!("Autosave stopped");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutdown::ShutdownHandle;
    use chain_core::Item;
    use chain_persist::SnapshotStore;

    #[tokio::test]
    async fn autosave_writes_without_explicit_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open(dir.path()).unwrap();
        let engine = StateEngine::load(store).await;
        engine.restock(Item::Jeans, 7).await;

        let (handle, shutdown) = ShutdownHandle::new();
        let task = tokio::spawn(Autosave::new(engine, shutdown).run());

        // First tick fires immediately; give it a moment to hit the disk.
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.trigger();
        task.await.unwrap();

        let reloaded = SnapshotStore::open(dir.path()).unwrap().load().await;
        assert_eq!(reloaded.jeans, 27);
    }
}
