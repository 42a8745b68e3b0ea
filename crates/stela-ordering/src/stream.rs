//! Outbound proposal stream.

use std::sync::Arc;
use stela_types::Proposal;
use tokio::sync::broadcast;

/// Publish/subscribe channel carrying released proposals to consensus
/// consumers.
///
/// Every subscriber receives each proposal published after it subscribed,
/// in publish order, at most once. Subscription is not retroactive: past
/// releases are not replayed.
#[derive(Debug, Clone)]
pub struct ProposalStream {
    sender: broadcast::Sender<Arc<Proposal>>,
}

impl ProposalStream {
    /// Creates a stream with the given per-subscriber capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Registers a new consumer.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<Proposal>> {
        self.sender.subscribe()
    }

    /// Delivers a proposal to all current subscribers.
    ///
    /// Publishing with no subscribers is not an error; the proposal is
    /// simply dropped.
    pub fn publish(&self, proposal: Arc<Proposal>) {
        let _ = self.sender.send(proposal);
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
