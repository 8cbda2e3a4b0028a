use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::snake::Point;

/// Seedable random source owned by one engine. A fixed seed replays the same
/// food sequence for the same inputs.
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    /// Uniformly random cell of a `width` x `height` grid.
    pub fn random_cell(&mut self, width: usize, height: usize) -> Point {
        Point::new(self.random_range(0..width), self.random_range(0..height))
    }
}
