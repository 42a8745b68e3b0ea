//! Ordering proposals.
//!
//! A proposal is a batch of transactions tagged with the height of the
//! block it proposes to extend the chain to. Proposals are immutable once
//! built; the ordering gate reads only the height.

use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A unique proposal identifier (SHA-256 hash of the proposal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProposalId([u8; 32]);

impl ProposalId {
    /// Creates a proposal ID from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the hex representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for ProposalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// A height-tagged batch of transactions produced by the ordering service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    height: u64,
    transactions: Vec<Transaction>,
    created_at: u64,
}

impl Proposal {
    /// Creates a new proposal for the given height.
    pub fn new(height: u64, transactions: Vec<Transaction>, created_at: u64) -> Self {
        Self {
            height,
            transactions,
            created_at,
        }
    }

    /// The height of the block this proposal extends the chain to.
    pub fn height(&self) -> u64 {
        self.height
    }

    /// The batched transactions, in ordering-service order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Creation timestamp (unix milliseconds).
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Number of transactions in this proposal.
    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }

    /// Computes the proposal ID.
    pub fn id(&self) -> ProposalId {
        let bytes = serde_json::to_vec(self).expect("proposal serialization should not fail");
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let result = hasher.finalize();
        let mut id = [0u8; 32];
        id.copy_from_slice(&result);
        ProposalId(id)
    }
}
