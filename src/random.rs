//! Seeded uniform distributions.
//!
//! Every random decision of a generation run is drawn from one
//! [`RandomSource`], so a run is fully determined by its seed.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[derive(Debug)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        RandomSource {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns a number uniformly drawn from `[1, n]`.
    pub fn uniform(&mut self, n: u32) -> u32 {
        debug_assert!(n > 0, "uniform distribution over an empty range");
        self.rng.random_range(1..=n)
    }

    /// Returns `true` with probability `1/n`.
    pub fn likely(&mut self, n: u32) -> bool {
        self.uniform(n) == 1
    }

    /// Returns the candidates that each independently survived a coin flip,
    /// in their original order.
    pub fn subset<T: Clone>(&mut self, candidates: &[T]) -> Vec<T> {
        debug_assert!(!candidates.is_empty(), "subset of an empty candidate set");
        candidates
            .iter()
            .filter(|_| self.rng.random_bool(0.5))
            .cloned()
            .collect()
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
