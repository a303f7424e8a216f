/// Seeded uniform random source for grid population.
///
/// Wraps a deterministic generator: the same seed always yields the same
/// draw sequence, and the stream continues across `reset` calls (only
/// `GridWorld::new` re-seeds).
pub struct SeedSource {
    rng: fastrand::Rng,
}

impl SeedSource {
    /// Derive a source from an integer seed
    pub fn seed(seed: u64) -> Self {
        SeedSource {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Draw a single uniform bit (0 or 1)
    pub fn uniform_bit(&mut self) -> u8 {
        self.rng.u8(0..2)
    }

    /// Draw `n` uniform bits
    pub fn uniform_bits(&mut self, n: usize) -> Vec<u8> {
        (0..n).map(|_| self.uniform_bit()).collect()
    }
}
