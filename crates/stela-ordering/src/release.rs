//! Single-slot release admission flag.

use std::sync::atomic::{AtomicBool, Ordering};

/// Admission flag that is true exactly when the pipeline is ready to accept
/// the next proposal release.
///
/// [`try_close`](ReleaseGate::try_close) has at-most-one-winner semantics:
/// of any number of concurrent callers, exactly one observes the
/// open-to-closed transition.
#[derive(Debug)]
pub struct ReleaseGate {
    open: AtomicBool,
}

impl ReleaseGate {
    /// Creates a gate in the given state.
    pub fn new(open: bool) -> Self {
        Self {
            open: AtomicBool::new(open),
        }
    }

    /// Returns true if the gate is open.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Atomically transitions the gate from open to closed.
    ///
    /// Returns true iff the transition happened, i.e. this caller won the
    /// single outstanding release slot.
    pub fn try_close(&self) -> bool {
        self.open
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Unconditionally closes the gate.
    pub fn close(&self) {
        self.open.store(false, Ordering::Release);
    }

    /// Opens the gate. Idempotent.
    pub fn open(&self) {
        self.open.store(true, Ordering::Release);
    }
}
