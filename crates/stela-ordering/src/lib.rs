//! # Stela Ordering
//!
//! The synchronization gate between the Stela ordering service and the
//! consensus pipeline.
//!
//! The ordering service batches pending transactions into height-tagged
//! [`Proposal`](stela_types::Proposal)s; the consensus pipeline finalizes
//! blocks one height at a time. The gate sits between the two: it accepts
//! proposals and commit notifications arriving from independent sources,
//! and releases exactly one proposal per committed height, in strict
//! height order.
//!
//! # Components
//!
//! - [`HeightTracker`]: highest height known to have been committed
//! - [`ProposalBuffer`]: holding area for proposals awaiting release
//! - [`ReleaseGate`]: single-slot admission flag with at-most-one-winner
//!   close semantics
//! - [`ProposalStream`]: fan-out of released proposals to consensus
//!   consumers
//! - [`OrderingGate`]: the orchestrator tying the above together
//! - [`Transport`]: seam to the networking layer for client transactions
//!
//! # Data Flow
//!
//! ```text
//! ┌──────────────┐  proposals   ┌──────────────┐  released    ┌──────────────┐
//! │   Ordering   │─────────────▶│   Ordering   │─────────────▶│  Consensus   │
//! │   Service    │              │     Gate     │  (height     │  Pipeline    │
//! └──────────────┘              └──────▲───────┘   order)     └──────┬───────┘
//!                                      │                             │
//!                                      │  commit notifications       │
//!                                      └─────────────────────────────┘
//! ```
//!
//! A proposal is released only when its height equals the committed height
//! plus one, and only while the gate is open; every release closes the gate
//! until the next commit notification reopens it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod config;
mod error;
mod gate;
mod height;
mod release;
mod stream;
mod transport;

pub use buffer::ProposalBuffer;
pub use config::GateConfig;
pub use error::{OrderingError, Result};
pub use gate::OrderingGate;
pub use height::HeightTracker;
pub use release::ReleaseGate;
pub use stream::ProposalStream;
pub use transport::{NoopTransport, Transport};
