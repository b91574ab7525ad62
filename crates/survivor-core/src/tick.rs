use crate::{rng, SplitMix64};

/// Per-tick inputs shared by every node evaluated during that tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
    pub seed: u64,
}

impl TickContext {
    pub fn new(tick: u64, dt_seconds: f32, seed: u64) -> Self {
        Self {
            tick,
            dt_seconds,
            seed,
        }
    }

    /// A generator private to this tick and `stream`.
    pub fn rng(&self, stream: u64) -> SplitMix64 {
        SplitMix64::new(rng::derive_seed(self.seed, self.tick, stream))
    }

    pub fn next(&self) -> Self {
        Self {
            tick: self.tick.wrapping_add(1),
            ..*self
        }
    }
}
