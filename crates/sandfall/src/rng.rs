//! Random source consumed by the update rule.

use rand::Rng;

/// Largest jitter subtracted from a straight fall.
pub const MAX_JITTER: u16 = 3;

/// The two random decisions a tick makes. Any `rand::Rng` works; tests pass
/// scripted sources to pin exact outcomes.
pub trait TickRng {
    /// Uniform in `0..=MAX_JITTER`.
    fn jitter(&mut self) -> u16;

    /// Coin flip between the two diagonals. `true` picks down-left.
    fn pick_left(&mut self) -> bool;
}

impl<R: Rng> TickRng for R {
    fn jitter(&mut self) -> u16 {
        self.random_range(0..=MAX_JITTER)
    }

    fn pick_left(&mut self) -> bool {
        self.random_bool(0.5)
    }
}

/// Fixed answers, for tests that need one exact outcome.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedRng {
    pub jitter: u16,
    pub left: bool,
}

#[cfg(test)]
impl TickRng for FixedRng {
    fn jitter(&mut self) -> u16 {
        self.jitter
    }

    fn pick_left(&mut self) -> bool {
        self.left
    }
}
