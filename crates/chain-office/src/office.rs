//! # Head Office
//!
//! Spawns the configured branches, dispatches commands, and drives graceful
//! shutdown.
//!
//! ## Spawn Sequence (per branch)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. ensure cmd_<name>.fifo and reply_<name>.fifo exist                  │
//! │  2. spawn `branchd <name> <cmd-fifo> <reply-fifo> <data-dir>`           │
//! │  3. open the command write end and the reply read end                   │
//! │  4. attach the reply stream to the ReplyMux                             │
//! │                                                                         │
//! │  Endpoints open in read-write mode, so steps 2 and 3 cannot deadlock    │
//! │  on each other regardless of which side opens first.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use tokio::process::{Child, Command as ProcessCommand};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use chain_core::Command;
use chain_ipc::{ensure_fifo, open_receiver, open_sender, LineSender};

use crate::config::OfficeConfig;
use crate::error::{OfficeError, OfficeResult};
use crate::mux::{ReplyMux, TaggedReply};

/// Everything the office holds for one spawned branch.
///
/// Exclusively owned by the office; the branch's counters live on the other
/// side of the pipes.
struct BranchHandle {
    name: String,
    commands: LineSender,
    child: Child,
    reader: JoinHandle<()>,
}

/// The aggregator: branch handles plus the multiplexed reply loop.
pub struct HeadOffice {
    config: OfficeConfig,
    branches: Vec<BranchHandle>,
    mux: ReplyMux,
}

impl HeadOffice {
    /// Spawns every configured branch and wires up both channel directions.
    ///
    /// Any failure here is fatal to the whole office: a half-spawned chain
    /// is not worth coordinating.
    pub async fn spawn(config: OfficeConfig) -> OfficeResult<Self> {
        config.validate()?;
        std::fs::create_dir_all(&config.runtime_dir)?;

        info!(
            branches = config.branches.len(),
            runtime_dir = %config.runtime_dir.display(),
            "Launching branches"
        );

        let mux = ReplyMux::new();
        let mut branches = Vec::with_capacity(config.branches.len());

        for spec in &config.branches {
            let cmd_fifo = config.command_fifo(&spec.name);
            let reply_fifo = config.reply_fifo(&spec.name);
            ensure_fifo(&cmd_fifo)?;
            ensure_fifo(&reply_fifo)?;

            let child = ProcessCommand::new(&config.branch_exe)
                .arg(&spec.name)
                .arg(&cmd_fifo)
                .arg(&reply_fifo)
                .arg(spec.data_dir())
                .spawn()
                .map_err(|source| OfficeError::Spawn {
                    branch: spec.name.clone(),
                    source,
                })?;

            let commands = open_sender(&cmd_fifo)?;
            let reader = mux.attach(spec.name.clone(), open_receiver(&reply_fifo)?);

            info!(branch = %spec.name, pid = ?child.id(), "Branch spawned");
            branches.push(BranchHandle {
                name: spec.name.clone(),
                commands,
                child,
                reader,
            });
        }

        Ok(HeadOffice {
            config,
            branches,
            mux,
        })
    }

    /// Branch names in registration order.
    pub fn branch_names(&self) -> Vec<String> {
        self.branches.iter().map(|b| b.name.clone()).collect()
    }

    /// Sends one command to one branch.
    pub async fn send(&mut self, branch: &str, command: &Command) -> OfficeResult<()> {
        let handle = self
            .branches
            .iter_mut()
            .find(|b| b.name == branch)
            .ok_or_else(|| OfficeError::UnknownBranch(branch.to_string()))?;

        debug!(branch = %branch, %command, "Sending command");
        handle.commands.send(&command.to_string()).await?;
        Ok(())
    }

    /// Sends one command to every branch, in registration order.
    ///
    /// Ordering is only guaranteed within each branch's own stream.
    pub async fn broadcast(&mut self, command: &Command) -> OfficeResult<()> {
        debug!(%command, "Broadcasting command");
        for handle in &mut self.branches {
            handle.commands.send(&command.to_string()).await?;
        }
        Ok(())
    }

    /// Receives the next reply from any branch, bounded by the configured
    /// poll timeout. `None` means nothing arrived within the bound.
    pub async fn next_reply(&mut self) -> Option<TaggedReply> {
        self.mux.recv_timeout(self.config.poll_timeout()).await
    }

    /// Graceful shutdown: broadcast EXIT, drain acknowledgements for the
    /// grace period, then release channel resources.
    ///
    /// Branch processes persist their own state; the office does not need to
    /// outwait them, but it reaps promptly-exiting children to avoid leaving
    /// zombies behind.
    pub async fn shutdown(mut self) -> OfficeResult<()> {
        info!("Requesting graceful shutdown");
        self.broadcast(&Command::Exit).await?;

        let deadline = Instant::now() + self.config.grace_period();
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.mux.recv_timeout(remaining).await {
                Some(reply) => debug!(branch = %reply.branch, line = %reply.line, "Shutdown reply"),
                None => break,
            }
        }

        for mut handle in self.branches {
            handle.reader.abort();
            match tokio::time::timeout(Duration::from_millis(200), handle.child.wait()).await {
                Ok(Ok(status)) => info!(branch = %handle.name, %status, "Branch exited"),
                Ok(Err(e)) => warn!(branch = %handle.name, error = %e, "Could not reap branch"),
                Err(_) => warn!(branch = %handle.name, "Branch still running; leaving it to finish"),
            }
        }

        info!("Head office shut down");
        Ok(())
    }
}
