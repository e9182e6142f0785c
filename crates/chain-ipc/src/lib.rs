//! # chain-ipc: Line-Framed FIFO Transport
//!
//! A duplex logical connection composed of two unidirectional named pipes,
//! one per direction, carrying newline-delimited text messages.
//!
//! ## Receive Contract
//! The receiving side tolerates, in arrival order:
//! - **partial arrival** - bytes buffer until the delimiter shows up
//! - **no data yet** - the read suspends on readiness (no polling delay)
//! - **coalesced messages** - several complete lines in one read are split
//!   and surfaced one at a time, in order
//!
//! ## Framing Limit
//! The receive buffer grows as needed up to [`DEFAULT_MAX_FRAME`]. A line
//! that exceeds the limit surfaces as an explicit [`IpcError::FrameTooLong`]
//! and the stream resynchronizes at the next delimiter - oversized input is
//! an error, never a silent truncation.

pub mod error;
pub mod fifo;
pub mod framing;

pub use error::{IpcError, IpcResult};
pub use fifo::{ensure_fifo, open_receiver, open_sender};
pub use framing::{LineBuffer, LineReceiver, LineSender, DEFAULT_MAX_FRAME};
