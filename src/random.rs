//! Input generation for benchmarked operations.
//!
//! Operations draw one input per invocation from a [`RandomSource`]. The
//! source is injected, so tests can replay a fixed input sequence.

use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::ops::Range;

/// Supplier of uniformly distributed real values.
pub trait RandomSource {
    /// Draws a value from `[range.start, range.end)`.
    ///
    /// An empty range yields `range.start`.
    fn uniform(&mut self, range: Range<f64>) -> f64;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn uniform(&mut self, range: Range<f64>) -> f64 {
        (**self).uniform(range)
    }
}

impl<S: RandomSource + ?Sized> RandomSource for Box<S> {
    fn uniform(&mut self, range: Range<f64>) -> f64 {
        (**self).uniform(range)
    }
}

/// [`RandomSource`] backed by any [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ChaCha8Rng> {
    /// Reproducible source: the same seed yields the same input sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl RngSource<ThreadRng> {
    /// Source seeded from the thread-local generator.
    pub fn from_entropy() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform(&mut self, range: Range<f64>) -> f64 {
        if range.is_empty() {
            return range.start;
        }
        self.rng.random_range(range)
    }
}
