use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the random offset used by the education criterion.
///
/// Injected into `HeuristicScorer` so tests and seeded deployments can pin it.
pub trait RandomSource: Send + Sync {
    /// Returns a whole number in `[0, bound)`. `bound` is always non-zero.
    fn below(&self, bound: u32) -> u32;
}

/// Default source backed by the thread-local RNG.
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn below(&self, bound: u32) -> u32 {
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Reproducible source, enabled by `SCORING_SEED`.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn below(&self, bound: u32) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..bound)
    }
}

/// Always yields the same offset, capped to `bound - 1`.
#[cfg(test)]
pub struct FixedRandom(pub u32);

#[cfg(test)]
impl RandomSource for FixedRandom {
    fn below(&self, bound: u32) -> u32 {
        self.0.min(bound.saturating_sub(1))
    }
}
