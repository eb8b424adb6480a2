//! Deterministic simulation-level RNG wrapper.
//!
//! The only stochastic part of this core is the *random* loading profile,
//! which draws every agent's departure interval from one global stream.  A
//! single seeded `SmallRng` therefore suffices: identical seeds reproduce
//! identical departure assignments, and no per-agent stream separation is
//! needed because draws happen in a fixed agent order before the interval
//! loop starts.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG for loading-profile draws and other global randomness.
///
/// Used only in single-threaded contexts; the interval loop itself never
/// draws.
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

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
