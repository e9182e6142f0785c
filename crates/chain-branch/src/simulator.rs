//! # Background Sales Simulator
//!
//! Random walk-in customers. Every tick each item independently rolls its
//! own odds and, on a hit, sells one unit through the same guarded engine
//! path a SALE command uses - an empty shelf simply fails the unit sale with
//! no side effects.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use chain_core::Item;

use crate::engine::StateEngine;
use crate::shutdown::Shutdown;

/// Interval between simulated customer ticks.
pub const SALES_TICK: Duration = Duration::from_millis(300);

/// One-in-N odds of a shirt selling on a tick.
const SHIRTS_SALE_ODDS: u32 = 5;

/// One-in-N odds of a pair of jeans selling on a tick.
const JEANS_SALE_ODDS: u32 = 7;

/// The simulator task. Runs until shutdown is triggered.
pub struct SalesSimulator {
    engine: StateEngine,
    shutdown: Shutdown,
}

impl SalesSimulator {
    pub fn new(engine: StateEngine, shutdown: Shutdown) -> Self {
        SalesSimulator { engine, shutdown }
    }

    pub async fn run(mut self) {
        // Seeded per task, so branches (and restarts) diverge.
        let mut rng = StdRng::from_entropy();

        let mut tick = tokio::time::interval(SALES_TICK);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    if rng.gen_ratio(1, SHIRTS_SALE_ODDS) {
                        if self.engine.sell(Item::Shirts, 1).await.is_ok() {
                            debug!(item = %Item::Shirts, "Simulated sale");
                        }
                    }
                    if rng.gen_ratio(1, JEANS_SALE_ODDS) {
                        if self.engine.sell(Item::Jeans, 1).await.is_ok() {
                            debug!(item = %Item::Jeans, "Simulated sale");
                        }
                    }
                }
                _ = self.shutdown.triggered() => {
                    info!("Sales simulator stopped");
                    break;
                }
            }
        }
    }
}
