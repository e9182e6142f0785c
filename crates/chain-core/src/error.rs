//! # Error Types
//!
//! Domain-specific error types for chain-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  chain-core errors (this file)                                         │
//! │  ├── StateError       - Business rule violations (stock guards)        │
//! │  └── command::ParseError - Malformed / unknown command lines           │
//! │                                                                         │
//! │  chain-persist errors (separate crate)                                 │
//! │  └── PersistError     - Snapshot read/write failures                   │
//! │                                                                         │
//! │  chain-ipc errors (separate crate)                                     │
//! │  └── IpcError         - FIFO and framing failures                      │
//! │                                                                         │
//! │  Flow: StateError → interpreter reply; never crosses the wire as-is    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item, quantities)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::state::Item;

// =============================================================================
// State Error
// =============================================================================

/// Business rule violations raised by branch state transitions.
///
/// These are recovered locally: the interpreter translates them into failure
/// replies. They never terminate a branch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// A sale was requested for more units than the branch holds.
    ///
    /// The state is left untouched: a sale is all-or-nothing.
    #[error("Insufficient stock for {item}: available {available}, requested {requested}")]
    InsufficientStock {
        item: Item,
        available: u32,
        requested: u32,
    },

    /// The named item is not part of this branch's assortment.
    #[error("Unknown item: {0}")]
    UnknownItem(String),
}
