//! # Simulated Clock
//!
//! Deterministic tick counter for the scheduling loop.
//!
//! The clock only moves when the loop tells it to. Tick 0 is the state
//! before the first step; the first step runs at tick 1.

/// Monotonic tick counter
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    ticks: u64,
}

impl SimClock {
    /// Creates a clock at tick 0
    pub fn new() -> Self {
        Self { ticks: 0 }
    }

    /// Advances the clock by one tick and returns the new tick
    ///
    /// # Panics
    ///
    /// Panics if advancing would overflow u64.
    pub fn advance(&mut self) -> u64 {
        self.ticks = self.ticks.checked_add(1).expect("Clock tick overflow");
        self.ticks
    }

    /// Returns the current tick
    pub fn current(&self) -> u64 {
        self.ticks
    }
}
