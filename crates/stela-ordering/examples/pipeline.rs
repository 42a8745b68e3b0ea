//! Run a miniature ordering pipeline against a single gate.
//!
//! Wires a commit-source channel and a consensus-side subscriber to an
//! ordering gate, then feeds it out-of-order proposals and watches the
//! release sequence.
//!
//! Usage:
//!   cargo run --example pipeline

use std::sync::Arc;
use stela_ordering::{GateConfig, NoopTransport, OrderingGate};
use stela_types::{Block, BlockId, CommitNotification, Proposal, Transaction};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let gate = OrderingGate::new(GateConfig::default(), Arc::new(NoopTransport));
    let mut released = gate.subscribe();

    let (commits, rx) = mpsc::channel(8);
    gate.bind_commit_source(rx).unwrap();

    // A client transaction goes out through the transport untouched.
    let tx = Transaction::new("alice@stela", b"transfer 10 -> bob".to_vec(), 1_700_000_000_000);
    gate.propagate_transaction(&tx).await.unwrap();

    // Height 2 is eligible at once; height 4 arrives early and is retained.
    gate.on_proposal(Proposal::new(2, vec![tx], 1_700_000_000_100));
    gate.on_proposal(Proposal::new(4, vec![], 1_700_000_000_200));

    let first = released.recv().await.unwrap();
    println!("released height {}", first.height());

    // Committing heights 2 and 3 makes the early proposal eligible.
    for height in 2..=3u64 {
        commits
            .send(CommitNotification::single(Block::new(
                height,
                BlockId::GENESIS_PARENT,
                vec![],
            )))
            .await
            .unwrap();
    }

    let second = released.recv().await.unwrap();
    println!("released height {}", second.height());

    gate.shutdown();
}
