//! Holding area for proposals that have arrived but not yet been released.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use stela_types::Proposal;

/// Thread-safe, unordered holding area for buffered proposals.
///
/// Admission is height-filtered rather than order-filtered, so no ordering
/// invariant is maintained here: the buffer is scanned, not sorted. The
/// expected steady-state occupancy is zero or one proposal.
#[derive(Debug, Default)]
pub struct ProposalBuffer {
    pending: Mutex<VecDeque<Arc<Proposal>>>,
}

impl ProposalBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a proposal to the holding area.
    pub fn insert(&self, proposal: Arc<Proposal>) {
        self.pending.lock().push_back(proposal);
    }

    /// Removes and returns an arbitrary buffered proposal.
    pub fn drain_one(&self) -> Option<Arc<Proposal>> {
        self.pending.lock().pop_front()
    }

    /// Returns the number of buffered proposals.
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Returns true if no proposals are buffered.
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}
