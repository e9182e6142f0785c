//! # branchd
//!
//! One retail branch as an independent process.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  branchd <name> <command-fifo> <reply-fifo> <data-dir>                  │
//! │                                                                         │
//! │  command FIFO ──► interpreter ──► state engine ──► reply FIFO           │
//! │  background: sales simulator (300ms) + autosave (800ms)                 │
//! │  EXIT ──► final snapshot ──► exit code 0                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The branch is fully parameterized by its arguments, so it is startable
//! (and testable) without the head office: create the two FIFOs, run it, and
//! talk to it with `cat` and `echo`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use chain_branch::BranchRuntime;

/// One branch of the retail chain.
#[derive(Debug, Parser)]
#[command(name = "branchd", version, about)]
struct Args {
    /// Branch identifier; tags every reply line.
    name: String,

    /// FIFO carrying head-office commands (this process reads it).
    command_fifo: PathBuf,

    /// FIFO carrying replies to the head office (this process writes it).
    reply_fifo: PathBuf,

    /// Directory holding this branch's snapshot files.
    data_dir: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    info!(branch = %args.name, "Starting branch");

    let runtime = match BranchRuntime::start(
        args.name.as_str(),
        &args.command_fifo,
        &args.reply_fifo,
        &args.data_dir,
    )
    .await
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(branch = %args.name, error = %e, "Branch setup failed");
            return ExitCode::FAILURE;
        }
    };

    match runtime.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(branch = %args.name, error = %e, "Branch terminated abnormally");
            ExitCode::FAILURE
        }
    }
}
