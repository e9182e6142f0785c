//! # Branch Runtime
//!
//! Wires the pieces into one process: open storage, load state, open the two
//! channel endpoints, start the simulator and autosave tasks, then serve
//! commands until EXIT.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  start()                                                                │
//! │    open data dir (fatal if path is not a directory)                     │
//! │    load snapshot or defaults                                            │
//! │    ensure + open command/reply FIFOs (fatal on failure)                 │
//! │                                                                         │
//! │  run()                                                                  │
//! │    spawn SalesSimulator + Autosave                                      │
//! │    loop: recv line → dispatch → send reply                             │
//! │    EXIT: acknowledge, trigger shutdown, join tasks, final snapshot      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use tracing::{info, warn};

use chain_core::Reply;
use chain_ipc::{ensure_fifo, open_receiver, open_sender, IpcError, LineReceiver, LineSender};
use chain_persist::SnapshotStore;

use crate::autosave::Autosave;
use crate::engine::StateEngine;
use crate::error::BranchResult;
use crate::interpreter::Interpreter;
use crate::shutdown::ShutdownHandle;
use crate::simulator::SalesSimulator;

/// One branch process, fully assembled.
pub struct BranchRuntime {
    name: String,
    engine: StateEngine,
    commands: LineReceiver,
    replies: LineSender,
}

impl BranchRuntime {
    /// Opens storage and channel endpoints.
    ///
    /// Failures here are unrecoverable setup errors; the caller should exit
    /// non-zero.
    pub async fn start(
        name: impl Into<String>,
        command_fifo: &Path,
        reply_fifo: &Path,
        data_dir: &Path,
    ) -> BranchResult<Self> {
        let name = name.into();

        let store = SnapshotStore::open(data_dir)?;
        let engine = StateEngine::load(store).await;

        ensure_fifo(command_fifo)?;
        ensure_fifo(reply_fifo)?;
        let commands = open_receiver(command_fifo)?;
        let replies = open_sender(reply_fifo)?;

        info!(
            branch = %name,
            data_dir = %data_dir.display(),
            "Branch ready"
        );

        Ok(BranchRuntime {
            name,
            engine,
            commands,
            replies,
        })
    }

    /// Serves commands until EXIT, then persists and returns.
    pub async fn run(mut self) -> BranchResult<()> {
        let (shutdown_handle, sim_shutdown) = ShutdownHandle::new();
        let save_shutdown = shutdown_handle.subscribe();

        let simulator = tokio::spawn(SalesSimulator::new(self.engine.clone(), sim_shutdown).run());
        let autosave = tokio::spawn(Autosave::new(self.engine.clone(), save_shutdown).run());

        let interpreter = Interpreter::new(self.name.clone(), self.engine.clone());

        loop {
            match self.commands.recv().await {
                Ok(Some(line)) => {
                    let dispatch = interpreter.dispatch(&line).await;
                    self.replies.send(&dispatch.reply.to_string()).await?;
                    if dispatch.exit {
                        break;
                    }
                }
                Ok(None) => {
                    // Command FIFO vanished from under us; treat like EXIT
                    // minus the acknowledgement nobody is left to read.
                    warn!(branch = %self.name, "Command stream closed, shutting down");
                    break;
                }
                Err(IpcError::FrameTooLong { limit }) => {
                    warn!(branch = %self.name, limit, "Oversized command line discarded");
                    let reply = Reply::new(
                        &self.name,
                        format!("Unknown or malformed command: (line exceeded {limit} bytes)"),
                    );
                    self.replies.send(&reply.to_string()).await?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        // Cooperative teardown: tasks observe the signal at their next
        // suspension point, then the final snapshot wins over any autosave.
        shutdown_handle.trigger();
        let _ = tokio::join!(simulator, autosave);
        self.engine.save().await?;

        info!(branch = %self.name, "Branch stopped");
        Ok(())
    }
}
