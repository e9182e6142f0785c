//! # Branch State
//!
//! The in-memory state of a single branch: stock counters, staff head-count
//! and cumulative sales. All transitions live here as pure methods so the
//! business rules are testable without any runtime.
//!
//! ## Invariants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Branch State Invariants                            │
//! │                                                                         │
//! │  • Stock counters never go negative (u32 + guarded sell)               │
//! │  • A sale executes iff stock >= requested quantity                     │
//! │  • A failed sale has NO side effects (all-or-nothing)                  │
//! │  • Sales counters only ever grow                                       │
//! │                                                                         │
//! │  NOTE: Concurrency is NOT handled here. The runtime wraps this state   │
//! │        in a single mutual-exclusion domain; every transition below is  │
//! │        atomic only because the caller holds that lock.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::{DEFAULT_JEANS, DEFAULT_SHIRTS, DEFAULT_STAFF};

// =============================================================================
// Item
// =============================================================================

/// The assortment carried by every branch.
///
/// The wire protocol names items in lowercase (`shirts`, `jeans`); anything
/// else fails to parse and is handled by the caller as a business-rule
/// failure (SALE) or a state no-op (RESTOCK).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    Shirts,
    Jeans,
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Shirts => write!(f, "shirts"),
            Item::Jeans => write!(f, "jeans"),
        }
    }
}

impl FromStr for Item {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shirts" => Ok(Item::Shirts),
            "jeans" => Ok(Item::Jeans),
            other => Err(StateError::UnknownItem(other.to_string())),
        }
    }
}

// =============================================================================
// Branch State
// =============================================================================

/// The full mutable state of one branch.
///
/// ## Lifecycle
/// ```text
/// load snapshot (or defaults 20/20/5/0/0)
///      │
///      ▼
/// mutated by interpreter commands AND the background sales simulator,
/// both under the runtime's single lock
///      │
///      ▼
/// periodically snapshotted; final snapshot on shutdown
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchState {
    /// Shirts currently in stock.
    pub shirts: u32,

    /// Jeans currently in stock.
    pub jeans: u32,

    /// Staff head-count.
    pub staff_count: u32,

    /// Cumulative shirts sold since the counters were created.
    pub sales_shirts: u32,

    /// Cumulative jeans sold since the counters were created.
    pub sales_jeans: u32,
}

impl Default for BranchState {
    fn default() -> Self {
        BranchState {
            shirts: DEFAULT_SHIRTS,
            jeans: DEFAULT_JEANS,
            staff_count: DEFAULT_STAFF,
            sales_shirts: 0,
            sales_jeans: 0,
        }
    }
}

impl BranchState {
    /// Current stock level for an item.
    pub fn stock_of(&self, item: Item) -> u32 {
        match item {
            Item::Shirts => self.shirts,
            Item::Jeans => self.jeans,
        }
    }

    /// Cumulative units sold for an item.
    pub fn sales_of(&self, item: Item) -> u32 {
        match item {
            Item::Shirts => self.sales_shirts,
            Item::Jeans => self.sales_jeans,
        }
    }

    /// Increases an item's stock by `qty`.
    ///
    /// Returns the new stock level. A quantity of zero is a no-op that still
    /// succeeds; the counter saturates rather than wrapping on absurd input.
    pub fn restock(&mut self, item: Item, qty: u32) -> u32 {
        let slot = match item {
            Item::Shirts => &mut self.shirts,
            Item::Jeans => &mut self.jeans,
        };
        *slot = slot.saturating_add(qty);
        *slot
    }

    /// Records a sale of `qty` units of `item`.
    ///
    /// Succeeds iff stock covers the full quantity; on success the stock
    /// counter is decremented and the matching sales counter incremented by
    /// exactly `qty`. On failure the state is untouched.
    pub fn sell(&mut self, item: Item, qty: u32) -> Result<(), StateError> {
        let available = self.stock_of(item);
        if available < qty {
            return Err(StateError::InsufficientStock {
                item,
                available,
                requested: qty,
            });
        }

        match item {
            Item::Shirts => {
                self.shirts -= qty;
                self.sales_shirts += qty;
            }
            Item::Jeans => {
                self.jeans -= qty;
                self.sales_jeans += qty;
            }
        }
        Ok(())
    }

    /// Adds one staff member. Returns the new head-count.
    ///
    /// Hiring is unconditional; only the count is tracked, not a roster.
    pub fn hire(&mut self) -> u32 {
        self.staff_count += 1;
        self.staff_count
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
