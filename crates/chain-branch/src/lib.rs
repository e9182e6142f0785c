//! # chain-branch: Branch Runtime
//!
//! The concurrent engine behind one branch process.
//!
//! ## Task Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       BranchRuntime                                     │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                     Command Loop (main task)                     │  │
//! │  │                                                                  │  │
//! │  │  recv line ──► Interpreter::dispatch ──► send tagged reply       │  │
//! │  │  EXIT ──► acknowledge, trigger shutdown, final snapshot          │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │              ┌────────────────┼────────────────┐                       │
//! │              ▼                ▼                ▼                        │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │  StateEngine   │  │ SalesSimulator │  │  Autosave              │    │
//! │  │                │  │                │  │                        │    │
//! │  │ One Mutex over │  │ 300ms tick     │  │ 800ms tick             │    │
//! │  │ BranchState;   │  │ 1-in-5 shirts  │  │ snapshot to disk,      │    │
//! │  │ every mutation │  │ 1-in-7 jeans   │  │ independent of         │    │
//! │  │ goes through it│  │ unit sales     │  │ mutation activity      │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! │                                                                         │
//! │  SHUTDOWN: a watch-channel signal checked at every suspension point.   │
//! │  Simulated and commanded mutations are indistinguishable to the state: │
//! │  both take the same lock, so interleavings are atomic per operation.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod autosave;
pub mod engine;
pub mod error;
pub mod interpreter;
pub mod runtime;
pub mod shutdown;
pub mod simulator;

pub use engine::StateEngine;
pub use error::{BranchError, BranchResult};
pub use interpreter::{Dispatch, Interpreter};
pub use runtime::BranchRuntime;
pub use shutdown::{Shutdown, ShutdownHandle};
