//! Seam to the networking layer.

use crate::error::Result;
use async_trait::async_trait;
use stela_types::Transaction;

/// Network transport consumed by the ordering gate.
///
/// Implemented by the networking layer. The gate only forwards client
/// transactions through this seam; delivery, retries, and peer selection
/// are the transport's concern.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a client transaction towards the ordering service.
    async fn propagate_transaction(&self, transaction: &Transaction) -> Result<()>;
}

/// Transport that drops everything, for tests and demos.
#[derive(Debug, Default)]
pub struct NoopTransport;

#[async_trait]
impl Transport for NoopTransport {
    async fn propagate_transaction(&self, _transaction: &Transaction) -> Result<()> {
        Ok(())
    }
}
