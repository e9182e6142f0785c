//! # Reply Multiplexer
//!
//! Fan-in of every branch's reply stream into one channel the control loop
//! can drain with a bounded wait.
//!
//! ## Fairness
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  reply FIFO (Ahmedabad) ──► reader task ──┐                             │
//! │  reply FIFO (Surat)     ──► reader task ──┼──► mpsc ──► recv()          │
//! │  reply FIFO (Vadodara)  ──► reader task ──┘                             │
//! │                                                                         │
//! │  • One task per branch: a chatty branch cannot starve a quiet one      │
//! │  • Per-branch arrival order is preserved (single task, single queue)   │
//! │  • Cross-branch order is whatever the scheduler made of it             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use chain_ipc::{IpcError, LineReceiver};

/// Queue depth per office. Replies are short; backpressure here only means
/// a reader task briefly parks while the control loop catches up.
const MUX_CAPACITY: usize = 256;

/// One reply line, tagged with the branch that sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedReply {
    pub branch: String,
    pub line: String,
}

/// Multiplexes many reply streams into one ordered-per-branch queue.
pub struct ReplyMux {
    tx: mpsc::Sender<TaggedReply>,
    rx: mpsc::Receiver<TaggedReply>,
}

impl Default for ReplyMux {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyMux {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(MUX_CAPACITY);
        ReplyMux { tx, rx }
    }

    /// Attaches one branch's reply stream, spawning its reader task.
    ///
    /// The task ends when the stream ends or the mux is dropped. An
    /// oversized reply line is logged and skipped; framing resumes at the
    /// next delimiter.
    pub fn attach(&self, branch: impl Into<String>, mut receiver: LineReceiver) -> JoinHandle<()> {
        let branch = branch.into();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(Some(line)) => {
                        let reply = TaggedReply {
                            branch: branch.clone(),
                            line,
                        };
                        if tx.send(reply).await.is_err() {
                            // Office gone; nothing left to report to.
                            break;
                        }
                    }
                    Ok(None) => {
                        debug!(branch = %branch, "Reply stream ended");
                        break;
                    }
                    Err(IpcError::FrameTooLong { limit }) => {
                        warn!(branch = %branch, limit, "Oversized reply line skipped");
                    }
                    Err(e) => {
                        warn!(branch = %branch, error = %e, "Reply stream failed");
                        break;
                    }
                }
            }
        })
    }

    /// Receives the next reply from any branch, waiting at most `timeout`.
    ///
    /// `None` means no branch had a complete reply within the bound - the
    /// caller's loop decides whether to keep waiting.
    pub async fn recv_timeout(&mut self, timeout: Duration) -> Option<TaggedReply> {
        tokio::time::timeout(timeout, self.rx.recv()).await.ok()?
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chain_ipc::{ensure_fifo, open_receiver, open_sender};

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn fan_in_tags_and_preserves_per_branch_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut mux = ReplyMux::new();
        let mut senders = Vec::new();

        for name in ["Ahmedabad", "Surat", "Vadodara"] {
            let path = dir.path().join(format!("reply_{name}.fifo"));
            ensure_fifo(&path).unwrap();
            mux.attach(name, open_receiver(&path).unwrap());
            senders.push((name, open_sender(&path).unwrap()));
        }

        for (name, tx) in &mut senders {
            tx.send(&format!("[{name}] first")).await.unwrap();
            tx.send(&format!("[{name}] second")).await.unwrap();
        }

        let mut received: Vec<TaggedReply> = Vec::new();
        while received.len() < 6 {
            let reply = mux
                .recv_timeout(Duration::from_secs(5))
                .await
                .expect("fan-in stalled");
            received.push(reply);
        }

        // Exactly two replies per branch, each tagged with its own name...
        for name in ["Ahmedabad", "Surat", "Vadodara"] {
            let from_branch: Vec<_> = received.iter().filter(|r| r.branch == name).collect();
            assert_eq!(from_branch.len(), 2);
            // ...and in the order that branch sent them.
            assert_eq!(from_branch[0].line, format!("[{name}] first"));
            assert_eq!(from_branch[1].line, format!("[{name}] second"));
        }
    }

    #[tokio::test]
    async fn recv_timeout_bounds_the_wait() {
        let mut mux = ReplyMux::new();
        let started = std::time::Instant::now();
        assert!(mux.recv_timeout(Duration::from_millis(50)).await.is_none());
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
