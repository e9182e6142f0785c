//! # State Engine
//!
//! The single mutual-exclusion domain over a branch's state.
//!
//! ## Locking Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    StateEngine Lock Discipline                          │
//! │                                                                         │
//! │  Interpreter commands ──┐                                              │
//! │  Sales simulator ───────┼──► Mutex<BranchState> (full state, no        │
//! │  Autosave snapshot ─────┘    partial locking)                          │
//! │                                                                         │
//! │  • Every operation holds the lock for its whole duration               │
//! │  • There is no "automatic" vs "commanded" distinction: the simulator   │
//! │    sells through exactly the same guarded path as a SALE command       │
//! │  • save() clones a consistent snapshot under the lock, then writes     │
//! │    outside it - mutators are never blocked on disk                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use chain_core::{BranchState, Item, StateError};
use chain_persist::{PersistResult, SnapshotStore};

/// Shared handle to one branch's state and its snapshot store.
///
/// Cheap to clone; all clones share the same lock.
#[derive(Clone)]
pub struct StateEngine {
    state: Arc<Mutex<BranchState>>,
    store: Arc<SnapshotStore>,
}

impl StateEngine {
    /// Loads the last snapshot (or defaults) from `store`.
    ///
    /// Never fails: missing or corrupt snapshot files degrade per-field.
    pub async fn load(store: SnapshotStore) -> Self {
        let state = store.load().await;
        StateEngine {
            state: Arc::new(Mutex::new(state)),
            store: Arc::new(store),
        }
    }

    /// Writes a consistent snapshot of the current state.
    pub async fn save(&self) -> PersistResult<()> {
        let snapshot = self.state.lock().await.clone();
        self.store.save(&snapshot).await
    }

    /// Increases stock of `item` by `qty`. Returns the new stock level.
    pub async fn restock(&self, item: Item, qty: u32) -> u32 {
        let mut state = self.state.lock().await;
        let level = state.restock(item, qty);
        debug!(%item, qty, level, "Restocked");
        level
    }

    /// Sells `qty` units of `item`, all-or-nothing.
    pub async fn sell(&self, item: Item, qty: u32) -> Result<(), StateError> {
        let mut state = self.state.lock().await;
        state.sell(item, qty)
    }

    /// Adds one staff member. Returns the new head-count.
    pub async fn hire(&self) -> u32 {
        let mut state = self.state.lock().await;
        state.hire()
    }

    /// A consistent copy of the full state.
    pub async fn summary(&self) -> BranchState {
        self.state.lock().await.clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    async fn fresh_engine() -> (tempfile::TempDir, StateEngine) {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open(dir.path()).unwrap();
        let engine = StateEngine::load(store).await;
        (dir, engine)
    }

    #[tokio::test]
    async fn loads_defaults_then_persists_mutations() {
        let (dir, engine) = fresh_engine().await;

        assert_eq!(engine.summary().await, BranchState::default());

        engine.restock(Item::Shirts, 10).await;
        engine.sell(Item::Shirts, 3).await.unwrap();
        engine.hire().await;
        engine.save().await.unwrap();

        // A second engine over the same directory sees the exact counters.
        let store = SnapshotStore::open(dir.path()).unwrap();
        let reloaded = StateEngine::load(store).await;
        let state = reloaded.summary().await;
        assert_eq!(state.shirts, 27);
        assert_eq!(state.sales_shirts, 3);
        assert_eq!(state.staff_count, 6);
    }

    #[tokio::test]
    async fn failed_sale_leaves_state_unchanged() {
        let (_dir, engine) = fresh_engine().await;

        let before = engine.summary().await;
        assert!(engine.sell(Item::Jeans, 25).await.is_err());
        assert_eq!(engine.summary().await, before);
    }

    /// No lost updates: the final stock equals the initial stock minus the
    /// sum of every individually applied decrement, no matter how the
    /// concurrent sellers interleave.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_sales_never_lose_updates() {
        let (_dir, engine) = fresh_engine().await;

        const SELLERS: u32 = 8;
        const SALES_EACH: u32 = 50;
        engine.restock(Item::Shirts, SELLERS * SALES_EACH).await;
        let initial = engine.summary().await.shirts;

        let mut tasks = Vec::new();
        for _ in 0..SELLERS {
            let engine = engine.clone();
            tasks.push(tokio::spawn(async move {
                for _ in 0..SALES_EACH {
                    engine.sell(Item::Shirts, 1).await.unwrap();
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let state = engine.summary().await;
        assert_eq!(state.shirts, initial - SELLERS * SALES_EACH);
        assert_eq!(state.sales_shirts, SELLERS * SALES_EACH);
    }

    /// Concurrent hires are equally atomic: N tasks hiring twice each must
    /// land on exactly 2N additional staff.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_hires_all_count() {
        let (_dir, engine) = fresh_engine().await;
        let before = engine.summary().await.staff_count;

        let mut tasks = Vec::new();
        for _ in 0..10 {
            let engine = engine.clone();
            tasks.push(tokio::spawn(async move {
                engine.hire().await;
                engine.hire().await;
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(engine.summary().await.staff_count, before + 20);
    }

    #[tokio::test]
    async fn save_is_safe_alongside_mutators() {
        let (_dir, engine) = fresh_engine().await;
        engine.restock(Item::Jeans, 1000).await;

        let seller = {
            let engine = engine.clone();
            tokio::spawn(async move {
                for _ in 0..200 {
                    engine.sell(Item::Jeans, 1).await.unwrap();
                }
            })
        };
        for _ in 0..20 {
            engine.save().await.unwrap();
        }
        seller.await.unwrap();

        engine.save().await.unwrap();
        let state = engine.summary().await;
        assert_eq!(state.jeans, 1020 - 200);
    }
}
