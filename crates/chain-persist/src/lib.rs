//! # chain-persist: Snapshot Persistence
//!
//! Durable storage for branch state. A branch's counters live in three
//! independent key-value text artifacts (`stock.txt`, `staff.txt`,
//! `sales.txt`); each is written whole on every save and read field-by-field
//! on load.
//!
//! ## Degradation Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Load Degradation Ladder                              │
//! │                                                                         │
//! │  File missing          → defaults for every field in it                │
//! │  File unreadable       → defaults for every field in it (warn)         │
//! │  Line malformed        → that field keeps its default (warn)           │
//! │  Key unknown           → ignored (forward compatibility)               │
//! │                                                                         │
//! │  load() NEVER fails. Corruption costs data, not availability.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Saving is internally serialized so the autosave task and an explicit
//! shutdown snapshot can never interleave their writes.

pub mod codec;
pub mod error;
pub mod store;

pub use error::{PersistError, PersistResult};
pub use store::SnapshotStore;
