//! # headoffice
//!
//! The coordinating process of the retail chain simulation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  headoffice [--config office.toml] [--branch-exe path] [...]            │
//! │                                                                         │
//! │  spawn branches ──► demo command script ──► print tagged replies        │
//! │  (bounded observation window) ──► broadcast EXIT ──► grace ──► done     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tokio::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use chain_core::Command;
use chain_office::{HeadOffice, OfficeConfig, OfficeResult};

/// Head office of the retail chain.
#[derive(Debug, Parser)]
#[command(name = "headoffice", version, about)]
struct Args {
    /// TOML configuration file. Without it, the default three-branch demo
    /// roster is used.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Branch executable to spawn (overrides the configured one).
    #[arg(long)]
    branch_exe: Option<PathBuf>,

    /// Directory for the per-branch FIFOs (overrides the configured one).
    #[arg(long)]
    runtime_dir: Option<PathBuf>,

    /// How long to keep printing replies before shutting down.
    #[arg(long, default_value_t = 10)]
    observe_secs: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Head office failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> OfficeResult<()> {
    let mut config = match &args.config {
        Some(path) => OfficeConfig::load(path)?,
        None => OfficeConfig::default(),
    };
    if let Some(exe) = args.branch_exe {
        config.branch_exe = exe;
    }
    if let Some(dir) = args.runtime_dir {
        config.runtime_dir = dir;
    }

    let mut office = HeadOffice::spawn(config).await?;

    run_demo_script(&mut office).await?;

    // Observation window: drain and print whatever the branches report.
    let deadline = Instant::now() + Duration::from_secs(args.observe_secs);
    while Instant::now() < deadline {
        if let Some(reply) = office.next_reply().await {
            println!("[{} -> office] {}", reply.branch, reply.line);
        }
    }

    office.shutdown().await
}

/// The default command source: a fixed script showing unicast and broadcast
/// traffic across the chain. Indices rotate over the roster, so it works for
/// any non-empty branch count.
async fn run_demo_script(office: &mut HeadOffice) -> OfficeResult<()> {
    let names = office.branch_names();
    let branch = |i: usize| names[i % names.len()].clone();

    info!(branches = names.len(), "Running demo script");

    office.broadcast(&Command::Hello).await?;
    office.broadcast(&Command::GetSummary).await?;

    office
        .send(
            &branch(0),
            &Command::Restock {
                item: "shirts".into(),
                qty: 10,
            },
        )
        .await?;
    office
        .send(
            &branch(1),
            &Command::Sale {
                item: "jeans".into(),
                qty: 5,
            },
        )
        .await?;
    office
        .send(
            &branch(2),
            &Command::Hire {
                name: "Anil".into(),
                role: "Cashier".into(),
            },
        )
        .await?;
    office
        .send(
            &branch(0),
            &Command::Sale {
                item: "shirts".into(),
                qty: 3,
            },
        )
        .await?;
    office
        .send(
            &branch(1),
            &Command::Restock {
                item: "jeans".into(),
                qty: 7,
            },
        )
        .await?;

    office.broadcast(&Command::GetStock).await?;
    office.broadcast(&Command::GetStaff).await?;

    office
        .send(
            &branch(2),
            &Command::Sale {
                item: "shirts".into(),
                qty: 2,
            },
        )
        .await?;
    office
        .send(
            &branch(2),
            &Command::Sale {
                item: "jeans".into(),
                qty: 1,
            },
        )
        .await?;

    office.broadcast(&Command::GetSales).await?;
    office.broadcast(&Command::GetSummary).await?;

    Ok(())
}
