//! # Line Framing
//!
//! Newline-delimited message framing over a byte stream.
//!
//! ## Receive State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   bytes in ──► [ buffer ] ──'\n' found──► message out (in order)        │
//! │                    │                                                    │
//! │                    │ buffer > max frame, no delimiter                   │
//! │                    ▼                                                    │
//! │              FrameTooLong error, then DISCARD until the next '\n',      │
//! │              then back to normal framing                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The buffer logic lives in [`LineBuffer`], separate from the pipe I/O, so
//! the framing contract is testable without file descriptors.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::unix::pipe;

use crate::error::{IpcError, IpcResult};

/// Default per-line frame limit in bytes.
///
/// Generous for a protocol whose longest legitimate line is a summary reply;
/// anything beyond this is a peer bug surfaced as [`IpcError::FrameTooLong`].
pub const DEFAULT_MAX_FRAME: usize = 8 * 1024;

/// Read chunk size. Several complete lines may arrive in one chunk; the
/// buffer splits them.
const READ_CHUNK: usize = 1024;

// =============================================================================
// Line Buffer (pure framing state)
// =============================================================================

/// Growable receive buffer with explicit overflow handling.
#[derive(Debug)]
pub struct LineBuffer {
    buf: Vec<u8>,
    max_frame: usize,
    /// True while skipping the tail of an oversized line.
    discarding: bool,
}

impl LineBuffer {
    pub fn new(max_frame: usize) -> Self {
        LineBuffer {
            buf: Vec::new(),
            max_frame,
            discarding: false,
        }
    }

    /// Appends newly received bytes.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Takes the next complete line out of the buffer.
    ///
    /// Returns `None` when more bytes are needed. The `FrameTooLong` error
    /// is reported once per oversized line; the line's remaining bytes are
    /// then discarded through its delimiter.
    pub fn next_line(&mut self) -> Option<IpcResult<String>> {
        if self.discarding {
            match find_newline(&self.buf) {
                Some(pos) => {
                    self.buf.drain(..=pos);
                    self.discarding = false;
                }
                None => {
                    // Still inside the oversized line; drop what we have.
                    self.buf.clear();
                    return None;
                }
            }
        }

        match find_newline(&self.buf) {
            Some(pos) => {
                let line: Vec<u8> = self.buf.drain(..=pos).take(pos).collect();
                Some(Ok(String::from_utf8_lossy(&line).into_owned()))
            }
            None if self.buf.len() > self.max_frame => {
                self.buf.clear();
                self.discarding = true;
                Some(Err(IpcError::FrameTooLong {
                    limit: self.max_frame,
                }))
            }
            None => None,
        }
    }
}

fn find_newline(buf: &[u8]) -> Option<usize> {
    buf.iter().position(|&b| b == b'\n')
}

// =============================================================================
// Line Sender
// =============================================================================

/// Write end of a channel direction.
pub struct LineSender {
    pipe: pipe::Sender,
}

impl LineSender {
    pub fn new(pipe: pipe::Sender) -> Self {
        LineSender { pipe }
    }

    /// Sends one message, appending the delimiter.
    ///
    /// `line` must not itself contain a newline; the framing contract has no
    /// escaping.
    pub async fn send(&mut self, line: &str) -> IpcResult<()> {
        self.pipe.write_all(line.as_bytes()).await?;
        self.pipe.write_all(b"\n").await?;
        Ok(())
    }
}

// =============================================================================
// Line Receiver
// =============================================================================

/// Read end of a channel direction.
///
/// `recv` suspends until a complete line is available - there is no polling
/// interval and no busy wait.
pub struct LineReceiver {
    pipe: pipe::Receiver,
    buffer: LineBuffer,
}

impl LineReceiver {
    pub fn new(pipe: pipe::Receiver) -> Self {
        Self::with_max_frame(pipe, DEFAULT_MAX_FRAME)
    }

    pub fn with_max_frame(pipe: pipe::Receiver, max_frame: usize) -> Self {
        LineReceiver {
            pipe,
            buffer: LineBuffer::new(max_frame),
        }
    }

    /// Receives the next complete line.
    ///
    /// Returns `Ok(None)` on end-of-stream (all write ends closed, which
    /// read-write-opened endpoints only hit when the file is deleted and
    /// descriptors dropped). Oversized lines surface as `FrameTooLong`; the
    /// caller may keep receiving afterwards.
    pub async fn recv(&mut self) -> IpcResult<Option<String>> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            if let Some(result) = self.buffer.next_line() {
                return result.map(Some);
            }
            let n = self.pipe.read(&mut chunk).await?;
            if n == 0 {
                return Ok(None);
            }
            self.buffer.extend(&chunk[..n]);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
