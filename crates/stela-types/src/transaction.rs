//! Client-submitted transactions.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A unique transaction identifier (SHA-256 hash of the transaction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId([u8; 32]);

impl TransactionId {
    /// Creates a transaction ID from raw bytes.
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

    /// Creates a transaction ID from a hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(hex_str, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// A state-changing operation submitted by a client.
///
/// The gate never inspects the payload; it only forwards transactions to
/// the transport and batches arrive back as [`crate::Proposal`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Account ID of the transaction creator.
    pub creator: String,

    /// Opaque command payload.
    pub payload: Vec<u8>,

    /// Creation timestamp (unix milliseconds).
    pub timestamp: u64,
}

impl Transaction {
    /// Creates a new transaction.
    pub fn new(creator: impl Into<String>, payload: Vec<u8>, timestamp: u64) -> Self {
        Self {
            creator: creator.into(),
            payload,
            timestamp,
        }
    }

    /// Computes the transaction ID.
    pub fn id(&self) -> TransactionId {
        let bytes = serde_json::to_vec(self).expect("transaction serialization should not fail");
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let result = hasher.finalize();
        let mut id = [0u8; 32];
        id.copy_from_slice(&result);
        TransactionId(id)
    }
}
