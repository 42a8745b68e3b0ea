//! Common types used throughout `stela`.
//!
//! This crate provides the core ledger types shared by the ordering
//! service, the ordering gate, and the consensus pipeline.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod block;
mod proposal;
mod transaction;

pub use block::{Block, BlockId, CommitNotification};
pub use proposal::{Proposal, ProposalId};
pub use transaction::{Transaction, TransactionId};
