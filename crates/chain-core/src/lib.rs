//! # chain-core: Pure Business Logic for Chainsim
//!
//! This crate is the **heart** of the retail chain simulator. It contains the
//! branch state machine and the line-oriented command protocol as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Chainsim Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Head Office (chain-office)                      │   │
//! │  │    spawn branches ──► send commands ──► collect replies        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ FIFO lines (chain-ipc)                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 Branch Runtime (chain-branch)                   │   │
//! │  │    command loop ──► interpreter ──► state engine               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ chain-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   state   │  │  command  │  │   reply   │                  │   │
//! │  │   │BranchState│  │  Command  │  │   Reply   │                  │   │
//! │  │   │   Item    │  │  grammar  │  │  tagging  │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PIPES • NO CLOCKS • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`] - Branch state (stock, staff, sales) and its transitions
//! - [`command`] - Command grammar: `VERB [ARG1] [ARG2]`
//! - [`reply`] - Branch-tagged reply lines
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every transition is deterministic - same input = same output
//! 2. **No I/O**: Pipes, files and clocks are FORBIDDEN here
//! 3. **Guarded Mutation**: Stock can never go negative; a sale is all-or-nothing
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod command;
pub mod error;
pub mod reply;
pub mod state;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use chain_core::Command` instead of
// `use chain_core::command::Command`

pub use command::{Command, ParseError};
pub use error::StateError;
pub use reply::Reply;
pub use state::{BranchState, Item};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default shirt stock for a branch that has no persisted snapshot.
pub const DEFAULT_SHIRTS: u32 = 20;

/// Default jeans stock for a branch that has no persisted snapshot.
pub const DEFAULT_JEANS: u32 = 20;

/// Default staff head-count for a branch that has no persisted snapshot.
pub const DEFAULT_STAFF: u32 = 5;
