//! # chain-office: Head-Office Aggregator
//!
//! Owns the set of branch handles, issues commands, and runs the multiplexed
//! reply loop.
//!
//! ## Ownership Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        HeadOffice                                       │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  BranchHandle (one per branch, registration order)               │  │
//! │  │                                                                  │  │
//! │  │  • name                    • command-stream write end            │  │
//! │  │  • child process handle    • reply reader task                   │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The office owns NO branch state - only channel and child handles.     │
//! │  What it knows about a branch's counters is what replies report.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod mux;
pub mod office;

pub use config::{BranchSpec, OfficeConfig};
pub use error::{OfficeError, OfficeResult};
pub use mux::{ReplyMux, TaggedReply};
pub use office::HeadOffice;
