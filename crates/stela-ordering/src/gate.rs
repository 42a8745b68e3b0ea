//! The ordering gate orchestrator.
//!
//! Consumes commit notifications and incoming proposals from independent
//! sources and releases exactly one proposal per committed height, in
//! strict height order, through the outbound proposal stream.

use crate::buffer::ProposalBuffer;
use crate::config::GateConfig;
use crate::error::{OrderingError, Result};
use crate::height::HeightTracker;
use crate::release::ReleaseGate;
use crate::stream::ProposalStream;
use crate::transport::Transport;
use parking_lot::Mutex;
use std::sync::Arc;
use stela_types::{CommitNotification, Proposal, Transaction};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Shared gate state, referenced by the public handle and by the
/// commit-source forwarding task.
struct GateCore {
    /// Highest committed height.
    tracker: HeightTracker,

    /// Proposals awaiting release.
    buffer: ProposalBuffer,

    /// Single-slot release admission flag.
    release: ReleaseGate,

    /// Fan-out of released proposals.
    stream: ProposalStream,

    /// Network transport for client transactions.
    transport: Arc<dyn Transport>,
}

impl GateCore {
    fn on_commit(&self, notification: &CommitNotification) {
        self.release.open();
        self.tracker.advance(notification.heights());

        tracing::debug!(
            committed = self.tracker.current(),
            blocks = notification.blocks.len(),
            "absorbed commit notification"
        );

        self.admission_scan();
    }

    fn on_proposal(&self, proposal: Proposal) {
        tracing::info!(
            height = proposal.height(),
            tx_count = proposal.tx_count(),
            "received proposal"
        );

        self.buffer.insert(Arc::new(proposal));
        self.admission_scan();
    }

    /// Releases at most one eligible proposal.
    ///
    /// A candidate below the eligible height is discarded permanently; one
    /// above it is put back and the gate is force-closed so nested triggers
    /// do not rescan it until the next commit. An exact match is released
    /// only by the caller that wins the `try_close` race; the loser
    /// requeues its candidate, so no proposal is lost.
    fn admission_scan(&self) {
        while self.release.is_open() {
            let Some(candidate) = self.buffer.drain_one() else {
                break;
            };
            let eligible = self.tracker.current() + 1;

            if candidate.height() < eligible {
                tracing::debug!(
                    height = candidate.height(),
                    eligible,
                    "stale proposal, discarding"
                );
                continue;
            }

            if candidate.height() > eligible {
                tracing::debug!(
                    height = candidate.height(),
                    eligible,
                    "proposal ahead of committed height, keeping buffered"
                );
                self.buffer.insert(candidate);
                self.release.close();
                break;
            }

            if !self.release.try_close() {
                // A concurrent scan won the release slot first.
                self.buffer.insert(candidate);
                break;
            }

            tracing::info!(height = eligible, "releasing proposal to consensus");
            self.stream.publish(candidate);
            break;
        }
    }
}

/// The ordering gate.
///
/// Accepts proposals and commit notifications arriving concurrently from
/// the transport and the consensus pipeline, and hands at most one proposal
/// per committed height to downstream consumers via
/// [`subscribe`](OrderingGate::subscribe).
///
/// The gate starts open with `initial_height` as the committed baseline, so
/// the first eligible proposal height is `initial_height + 1`.
pub struct OrderingGate {
    core: Arc<GateCore>,

    /// Commit-source forwarding task, released on shutdown.
    commit_task: Mutex<Option<JoinHandle<()>>>,
}

impl OrderingGate {
    /// Creates a gate over the given transport.
    pub fn new(config: GateConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            core: Arc::new(GateCore {
                tracker: HeightTracker::new(config.initial_height),
                buffer: ProposalBuffer::new(),
                release: ReleaseGate::new(true),
                stream: ProposalStream::new(config.stream_capacity),
                transport,
            }),
            commit_task: Mutex::new(None),
        }
    }

    /// Binds the commit source to the gate.
    ///
    /// Spawns a task forwarding each notification from `commits` to
    /// [`on_commit`](OrderingGate::on_commit). Called once after
    /// construction; a second call fails with
    /// [`OrderingError::CommitSourceAlreadyBound`]. The task only yields
    /// between notifications, so teardown never interrupts a scan.
    pub fn bind_commit_source(
        &self,
        mut commits: mpsc::Receiver<CommitNotification>,
    ) -> Result<()> {
        let mut slot = self.commit_task.lock();
        if slot.is_some() {
            return Err(OrderingError::CommitSourceAlreadyBound);
        }

        let core = self.core.clone();
        let handle = tokio::spawn(async move {
            while let Some(notification) = commits.recv().await {
                core.on_commit(&notification);
            }
            tracing::debug!("commit source closed");
        });

        *slot = Some(handle);
        Ok(())
    }

    /// Handles a commit notification.
    ///
    /// Opens the gate, advances the committed height to the maximum height
    /// in the notification, and runs the admission scan. Safe to call
    /// concurrently with [`on_proposal`](OrderingGate::on_proposal) and
    /// with itself.
    pub fn on_commit(&self, notification: &CommitNotification) {
        self.core.on_commit(notification);
    }

    /// Handles a newly arrived proposal.
    ///
    /// Buffers the proposal and runs the admission scan. Safe to call
    /// concurrently with [`on_commit`](OrderingGate::on_commit) and with
    /// itself.
    pub fn on_proposal(&self, proposal: Proposal) {
        self.core.on_proposal(proposal);
    }

    /// Forwards a client transaction to the transport.
    ///
    /// No gating logic; a transport failure is surfaced to the caller and
    /// not retried here.
    pub async fn propagate_transaction(&self, transaction: &Transaction) -> Result<()> {
        tracing::info!(
            creator = %transaction.creator,
            tx_id = %transaction.id(),
            "propagating transaction"
        );

        self.core.transport.propagate_transaction(transaction).await
    }

    /// Registers a consensus-side consumer of released proposals.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<Proposal>> {
        self.core.stream.subscribe()
    }

    /// Returns the highest committed height known to the gate.
    pub fn committed_height(&self) -> u64 {
        self.core.tracker.current()
    }

    /// Returns true if the gate is ready to release the next proposal.
    pub fn is_open(&self) -> bool {
        self.core.release.is_open()
    }

    /// Returns the number of proposals awaiting release.
    pub fn buffered_proposals(&self) -> usize {
        self.core.buffer.len()
    }

    /// Releases the commit-source binding.
    ///
    /// Idempotent; also invoked on drop. Subscribers see the stream end
    /// once the gate itself is dropped.
    pub fn shutdown(&self) {
        if let Some(task) = self.commit_task.lock().take() {
            task.abort();
        }
    }
}

impl Drop for OrderingGate {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::NoopTransport;
    use stela_types::{Block, BlockId};
    use tokio::sync::broadcast::error::TryRecvError;

    fn test_gate() -> OrderingGate {
        OrderingGate::new(GateConfig::default(), Arc::new(NoopTransport))
    }

    fn proposal(height: u64) -> Proposal {
        Proposal::new(height, vec![], 1_700_000_000)
    }

    fn commit(height: u64) -> CommitNotification {
        CommitNotification::single(Block::new(height, BlockId::GENESIS_PARENT, vec![]))
    }

    #[test]
    fn test_eligible_proposal_released_immediately() {
        let gate = test_gate();
        let mut released = gate.subscribe();

        gate.on_proposal(proposal(2));

        assert_eq!(released.try_recv().unwrap().height(), 2);
        assert!(!gate.is_open());
        assert_eq!(gate.committed_height(), 1);
    }

    #[test]
    fn test_premature_proposal_buffered_and_gate_closed() {
        let gate = test_gate();
        let mut released = gate.subscribe();

        gate.on_proposal(proposal(5));

        assert!(matches!(released.try_recv(), Err(TryRecvError::Empty)));
        assert!(!gate.is_open());
        assert_eq!(gate.buffered_proposals(), 1);
    }

    #[test]
    fn test_commit_below_eligibility_keeps_proposal_buffered() {
        let gate = test_gate();
        let mut released = gate.subscribe();

        gate.on_proposal(proposal(5));
        gate.on_commit(&commit(2));

        assert!(matches!(released.try_recv(), Err(TryRecvError::Empty)));
        assert!(!gate.is_open());
        assert_eq!(gate.buffered_proposals(), 1);
        assert_eq!(gate.committed_height(), 2);
    }

    #[test]
    fn test_catch_up_releases_at_eligibility() {
        let gate = test_gate();
        let mut released = gate.subscribe();

        gate.on_proposal(proposal(5));
        gate.on_commit(&commit(2));
        gate.on_commit(&commit(3));
        assert!(matches!(released.try_recv(), Err(TryRecvError::Empty)));

        gate.on_commit(&commit(4));

        assert_eq!(released.try_recv().unwrap().height(), 5);
        assert!(matches!(released.try_recv(), Err(TryRecvError::Empty)));
        assert_eq!(gate.buffered_proposals(), 0);
    }

    #[test]
    fn test_batched_commit_adopts_maximum_height() {
        let gate = test_gate();
        let mut released = gate.subscribe();

        gate.on_proposal(proposal(5));
        gate.on_commit(&CommitNotification::new(vec![
            Block::new(2, BlockId::GENESIS_PARENT, vec![]),
            Block::new(3, BlockId::GENESIS_PARENT, vec![]),
            Block::new(4, BlockId::GENESIS_PARENT, vec![]),
        ]));

        assert_eq!(gate.committed_height(), 4);
        assert_eq!(released.try_recv().unwrap().height(), 5);
    }

    #[test]
    fn test_stale_proposal_discarded() {
        let gate = test_gate();
        let mut released = gate.subscribe();

        gate.on_commit(&commit(3));
        gate.on_proposal(proposal(1));

        assert!(matches!(released.try_recv(), Err(TryRecvError::Empty)));
        assert_eq!(gate.buffered_proposals(), 0);
        // Stale discard leaves the gate open for the next round.
        assert!(gate.is_open());
    }

    #[test]
    fn test_duplicate_height_released_once() {
        let gate = test_gate();
        let mut released = gate.subscribe();

        gate.on_proposal(proposal(2));
        gate.on_proposal(proposal(2));

        assert_eq!(released.try_recv().unwrap().height(), 2);
        assert!(matches!(released.try_recv(), Err(TryRecvError::Empty)));
        assert_eq!(gate.buffered_proposals(), 1);

        // The leftover duplicate turns stale once height 2 commits.
        gate.on_commit(&commit(2));
        assert!(matches!(released.try_recv(), Err(TryRecvError::Empty)));
        assert_eq!(gate.buffered_proposals(), 0);
    }

    #[test]
    fn test_release_sequence_across_rounds() {
        let gate = test_gate();
        let mut released = gate.subscribe();

        for height in 2..=5u64 {
            gate.on_proposal(proposal(height));
        }

        assert_eq!(released.try_recv().unwrap().height(), 2);
        for height in 2..=4u64 {
            gate.on_commit(&commit(height));
            assert_eq!(released.try_recv().unwrap().height(), height + 1);
        }
        assert_eq!(gate.buffered_proposals(), 0);
    }

    #[test]
    fn test_commit_reopens_gate_without_proposals() {
        let gate = test_gate();

        gate.on_proposal(proposal(2));
        assert!(!gate.is_open());

        gate.on_commit(&commit(2));
        assert!(gate.is_open());
        assert_eq!(gate.committed_height(), 2);
    }

    #[tokio::test]
    async fn test_bind_commit_source_twice_fails() {
        let gate = test_gate();
        let (_tx_a, rx_a) = mpsc::channel(4);
        let (_tx_b, rx_b) = mpsc::channel(4);

        assert!(gate.bind_commit_source(rx_a).is_ok());
        assert!(matches!(
            gate.bind_commit_source(rx_b),
            Err(OrderingError::CommitSourceAlreadyBound)
        ));
    }

    #[tokio::test]
    async fn test_commit_source_drives_release() {
        let gate = test_gate();
        let mut released = gate.subscribe();
        let (commits, rx) = mpsc::channel(4);
        gate.bind_commit_source(rx).unwrap();

        gate.on_proposal(proposal(2));
        assert_eq!(released.recv().await.unwrap().height(), 2);

        gate.on_proposal(proposal(3));
        commits.send(commit(2)).await.unwrap();

        assert_eq!(released.recv().await.unwrap().height(), 3);
    }

    #[tokio::test]
    async fn test_shutdown_releases_commit_binding() {
        let gate = test_gate();
        let (commits, rx) = mpsc::channel(4);
        gate.bind_commit_source(rx).unwrap();

        gate.shutdown();
        gate.shutdown();

        // The forwarding task is gone; the channel observes closure.
        commits.closed().await;
    }

    #[tokio::test]
    async fn test_propagate_transaction_forwards() {
        struct RecordingTransport {
            seen: Mutex<Vec<String>>,
        }

        #[async_trait::async_trait]
        impl Transport for RecordingTransport {
            async fn propagate_transaction(&self, transaction: &Transaction) -> Result<()> {
                self.seen.lock().push(transaction.creator.clone());
                Ok(())
            }
        }

        let transport = Arc::new(RecordingTransport {
            seen: Mutex::new(Vec::new()),
        });
        let gate = OrderingGate::new(GateConfig::default(), transport.clone());

        let tx = Transaction::new("alice", b"cmd".to_vec(), 1_700_000_000);
        gate.propagate_transaction(&tx).await.unwrap();

        assert_eq!(transport.seen.lock().as_slice(), ["alice"]);
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces() {
        struct FailingTransport;

        #[async_trait::async_trait]
        impl Transport for FailingTransport {
            async fn propagate_transaction(&self, _transaction: &Transaction) -> Result<()> {
                Err(OrderingError::Transport("peer unreachable".into()))
            }
        }

        let gate = OrderingGate::new(GateConfig::default(), Arc::new(FailingTransport));
        let tx = Transaction::new("alice", b"cmd".to_vec(), 1_700_000_000);

        assert!(matches!(
            gate.propagate_transaction(&tx).await,
            Err(OrderingError::Transport(_))
        ));
    }
}
