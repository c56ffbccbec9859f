//! Seeded pseudo-random number generator
//!
//! Every stochastic strategy owns one of these for the whole run.
//! With a tournament seed the sequence is reproducible: same seed + stream
//! index = same sequence, and distinct roster slots never share a stream.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded random number generator
#[derive(Clone, Debug)]
pub struct SeededRng {
    inner: ChaCha8Rng,
}

impl SeededRng {
    /// Create a new RNG from a tournament seed and a stream index
    pub fn new(seed: u64, stream: u64) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(seed);
        inner.set_stream(stream);
        Self { inner }
    }

    /// Create an RNG seeded from OS entropy (non-reproducible runs)
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Create an RNG for a roster slot, reproducible only when a seed is given
    pub fn for_slot(seed: Option<u64>, slot: usize) -> Self {
        match seed {
            Some(s) => Self::new(s, slot as u64),
            None => Self::from_entropy(),
        }
    }

    /// Bernoulli draw; `p` is clamped to [0, 1] first
    pub fn chance(&mut self, p: f64) -> bool {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        self.inner.gen_bool(p)
    }

    /// Uniform integer in `[low, high]`
    pub fn range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        self.inner.gen_range(low..=high)
    }
}
