use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Reproducible randomness used for the file order and crop offsets.
pub trait RandomSource {
    fn seed(&mut self, seed: u64);
    fn shuffle<T>(&mut self, items: &mut [T]);
    /// Uniform integer in `low..=high`.
    fn uniform_int(&mut self, low: usize, high: usize) -> usize;
}

pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        SeededRandom { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        SeededRandom::new(crate::domain::entities::SHUFFLE_SEED)
    }
}

impl RandomSource for SeededRandom {
    fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    fn uniform_int(&mut self, low: usize, high: usize) -> usize {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..=high)
    }
}
