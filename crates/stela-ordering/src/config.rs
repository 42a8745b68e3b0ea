//! Gate configuration.

/// Configuration for the ordering gate.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Height baseline at construction.
    ///
    /// The gate starts open with this height recorded as committed, so the
    /// first eligible proposal height is `initial_height + 1`.
    pub initial_height: u64,

    /// Capacity of the outbound proposal stream.
    ///
    /// A subscriber that falls this many releases behind observes a lagged
    /// gap instead of blocking the gate.
    pub stream_capacity: usize,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            initial_height: 1,
            stream_capacity: 64,
        }
    }
}
