//! The simulation's single shared deterministic RNG.
//!
//! # Determinism strategy
//!
//! The whole substrate draws from one `SmallRng` seeded once at model
//! construction.  Reproducibility therefore reduces to draw *order*: the
//! time-step driver is single-threaded and visits networks, edges, and event
//! lists in a fixed sequence, so the same seed always produces the same run.
//! Components never construct their own generators; they receive
//! `&mut SimRng` from the caller.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::PersonId;

/// The model-wide deterministic RNG.  Constructed once from
/// `ModelConfig::seed` and threaded through every component that samples.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// A uniformly random person index in `[0, n_total)`.
    #[inline]
    pub fn uniform_person(&mut self, n_total: usize) -> PersonId {
        PersonId(self.0.gen_range(0..n_total as u32))
    }
}
