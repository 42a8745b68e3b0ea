//! Ordering gate error types.

use thiserror::Error;

/// Errors that can occur at the gate's collaborator boundaries.
///
/// Stale proposals, premature proposals, and lost release races are not
/// errors: the first is discarded, the other two are absorbed by the
/// admission scan.
#[derive(Debug, Error)]
pub enum OrderingError {
    /// A commit source is already bound to this gate.
    #[error("commit source already bound")]
    CommitSourceAlreadyBound,

    /// The transport failed to forward a transaction.
    #[error("transport: {0}")]
    Transport(String),
}

/// A specialized Result type for ordering gate operations.
pub type Result<T> = std::result::Result<T, OrderingError>;
