//! Broadcast semantics across three branches running in-process: the
//! GET_SUMMARY fan-out/fan-in contract and the EXIT shutdown contract,
//! exercised over real FIFOs end to end.

use std::time::Duration;

use tokio::time::timeout;

use chain_branch::BranchRuntime;
use chain_core::Command;
use chain_ipc::{open_receiver, open_sender, LineSender};
use chain_office::{BranchSpec, OfficeConfig, ReplyMux, TaggedReply};

const NAMES: [&str; 3] = ["Ahmedabad", "Surat", "Vadodara"];
const REPLY_WAIT: Duration = Duration::from_secs(5);

struct Chain {
    _dir: tempfile::TempDir,
    config: OfficeConfig,
    senders: Vec<(String, LineSender)>,
    mux: ReplyMux,
    runtimes: Vec<tokio::task::JoinHandle<chain_branch::BranchResult<()>>>,
}

/// Stands up three branches the way HeadOffice::spawn would, minus the child
/// processes: the runtimes run as tasks so the test owns both sides.
async fn start_chain() -> Chain {
    let dir = tempfile::tempdir().unwrap();
    let config = OfficeConfig {
        runtime_dir: dir.path().join("run"),
        branches: NAMES
            .iter()
            .map(|name| BranchSpec {
                name: name.to_string(),
                data_dir: Some(dir.path().join(format!("data_{name}"))),
            })
            .collect(),
        ..OfficeConfig::default()
    };
    std::fs::create_dir_all(&config.runtime_dir).unwrap();

    let mux = ReplyMux::new();
    let mut senders = Vec::new();
    let mut runtimes = Vec::new();

    for spec in &config.branches {
        let runtime = BranchRuntime::start(
            spec.name.as_str(),
            &config.command_fifo(&spec.name),
            &config.reply_fifo(&spec.name),
            &spec.data_dir.clone().unwrap(),
        )
        .await
        .unwrap();
        runtimes.push(tokio::spawn(runtime.run()));

        mux.attach(
            spec.name.clone(),
            open_receiver(&config.reply_fifo(&spec.name)).unwrap(),
        );
        senders.push((
            spec.name.clone(),
            open_sender(&config.command_fifo(&spec.name)).unwrap(),
        ));
    }

    Chain {
        _dir: dir,
        config,
        senders,
        mux,
        runtimes,
    }
}

async fn broadcast(chain: &mut Chain, command: &Command) {
    for (_, sender) in &mut chain.senders {
        sender.send(&command.to_string()).await.unwrap();
    }
}

async fn collect_replies(chain: &mut Chain, count: usize) -> Vec<TaggedReply> {
    let mut replies = Vec::new();
    while replies.len() < count {
        let reply = chain
            .mux
            .recv_timeout(REPLY_WAIT)
            .await
            .expect("missing replies from broadcast");
        replies.push(reply);
    }
    replies
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn broadcast_summary_yields_one_tagged_reply_per_branch() {
    let mut chain = start_chain().await;

    broadcast(&mut chain, &Command::GetSummary).await;
    let replies = collect_replies(&mut chain, NAMES.len()).await;

    // Exactly one reply per branch, each tagged with its own identifier;
    // cross-branch arrival order is deliberately unspecified.
    for name in NAMES {
        let from_branch: Vec<_> = replies.iter().filter(|r| r.branch == name).collect();
        assert_eq!(from_branch.len(), 1, "expected one reply from {name}");
        assert!(from_branch[0].line.starts_with(&format!("[{name}] Summary ::")));
    }

    // No stragglers beyond the three.
    assert!(chain
        .mux
        .recv_timeout(Duration::from_millis(200))
        .await
        .is_none());

    broadcast(&mut chain, &Command::Exit).await;
    for runtime in chain.runtimes.drain(..) {
        timeout(REPLY_WAIT, runtime).await.unwrap().unwrap().unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn broadcast_exit_acknowledges_persists_and_stops() {
    let mut chain = start_chain().await;

    broadcast(&mut chain, &Command::Exit).await;

    // Every branch acknowledges...
    let replies = collect_replies(&mut chain, NAMES.len()).await;
    for name in NAMES {
        assert!(
            replies
                .iter()
                .any(|r| r.branch == name
                    && r.line == format!("[{name}] Shutting down gracefully.")),
            "no EXIT acknowledgement from {name}"
        );
    }

    // ...every runtime stops...
    for runtime in chain.runtimes.drain(..) {
        timeout(REPLY_WAIT, runtime).await.unwrap().unwrap().unwrap();
    }

    // ...no further commands are accepted...
    broadcast(&mut chain, &Command::GetStock).await;
    assert!(
        chain
            .mux
            .recv_timeout(Duration::from_millis(300))
            .await
            .is_none(),
        "a branch answered after EXIT"
    );

    // ...and every branch persisted a final snapshot.
    for spec in &chain.config.branches {
        let stock = spec.data_dir.clone().unwrap().join("stock.txt");
        assert!(stock.exists(), "missing final snapshot for {}", spec.name);
    }
}
