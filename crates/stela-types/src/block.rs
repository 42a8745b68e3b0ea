//! Finalized blocks and commit notifications.

use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A unique block identifier (SHA-256 hash of the block).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId([u8; 32]);

impl BlockId {
    /// The genesis parent ID (all zeros).
    pub const GENESIS_PARENT: Self = Self([0u8; 32]);

    /// Creates a block ID from raw bytes.
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

impl Default for BlockId {
    fn default() -> Self {
        Self::GENESIS_PARENT
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// A finalized block as reported by the consensus pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block height.
    pub height: u64,

    /// Parent block ID.
    pub parent: BlockId,

    /// Ordered transactions in this block.
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Creates a new block.
    pub fn new(height: u64, parent: BlockId, transactions: Vec<Transaction>) -> Self {
        Self {
            height,
            parent,
            transactions,
        }
    }

    /// Computes the block ID.
    pub fn id(&self) -> BlockId {
        let bytes = serde_json::to_vec(self).expect("block serialization should not fail");
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let result = hasher.finalize();
        let mut id = [0u8; 32];
        id.copy_from_slice(&result);
        BlockId(id)
    }
}

/// A commit event carrying one or more finalized blocks.
///
/// A single notification may report several blocks at once, e.g. during
/// catch-up sync. Consumers reduce it by maximum height rather than
/// iterating in any particular order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitNotification {
    /// The finalized blocks.
    pub blocks: Vec<Block>,
}

impl CommitNotification {
    /// Creates a notification from a batch of finalized blocks.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Creates a notification for a single finalized block.
    pub fn single(block: Block) -> Self {
        Self {
            blocks: vec![block],
        }
    }

    /// The highest height in this notification, or `None` if it is empty.
    pub fn max_height(&self) -> Option<u64> {
        self.blocks.iter().map(|b| b.height).max()
    }

    /// Iterates over the heights of the committed blocks.
    pub fn heights(&self) -> impl Iterator<Item = u64> + '_ {
        self.blocks.iter().map(|b| b.height)
    }
}
