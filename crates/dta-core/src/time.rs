//! Simulation time model.
//!
//! # Design
//!
//! Loading time is represented as a monotonically increasing `Interval`
//! counter.  One interval spans `seconds_per_interval` seconds of simulated
//! time (the simulation resolution, 6 s by default):
//!
//!   wall_minute = start_minute + interval * seconds_per_interval / 60
//!
//! Using an integer interval as the canonical time unit means all queue and
//! departure arithmetic is exact (no floating-point drift) and comparisons
//! are O(1).  Minutes only appear at the edges: free-flow travel times come
//! in as minutes and waiting-time statistics go out bucketed by minute.

use std::fmt;

use crate::{DtaError, DtaResult};

// ── Interval ──────────────────────────────────────────────────────────────────

/// An absolute simulation interval counter.
///
/// Stored as `u64`: at the finest useful resolution (1 s per interval) a u64
/// outlasts any conceivable loading run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval(pub u64);

impl Interval {
    pub const ZERO: Interval = Interval(0);

    /// Return the interval `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Interval {
        Interval(self.0 + n)
    }

    /// Intervals elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Interval) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Interval {
    type Output = Interval;
    #[inline]
    fn add(self, rhs: u64) -> Interval {
        Interval(self.0 + rhs)
    }
}

impl std::ops::Sub for Interval {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Interval) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I{}", self.0)
    }
}

// ── SimulationConfig ──────────────────────────────────────────────────────────

/// Top-level network-loading configuration.
///
/// The loading window is `[0, total_intervals())` — departures are assigned
/// inside it and the engine advances exactly that many intervals.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    /// Wall-clock minute (e.g. minutes past midnight) of interval 0.  Only
    /// used to label outputs; all engine arithmetic is relative.
    pub start_minute: u32,

    /// Simulated span in minutes.  Also the demand loading window.
    pub duration_minutes: u32,

    /// Simulation resolution: seconds of simulated time per interval.
    /// Must divide 60 so minute boundaries land exactly on intervals.
    /// Default in practice: 6.
    pub seconds_per_interval: u32,

    /// Master RNG seed.  The same seed always produces identical departure
    /// assignments under the random loading profile.
    pub seed: u64,
}

impl SimulationConfig {
    /// Check the resolution and duration are usable.
    ///
    /// # Errors
    ///
    /// `DtaError::Config` if `seconds_per_interval` is zero or does not
    /// divide 60, or if `duration_minutes` is zero.
    pub fn validate(&self) -> DtaResult<()> {
        if self.seconds_per_interval == 0 || 60 % self.seconds_per_interval != 0 {
            return Err(DtaError::Config(format!(
                "seconds_per_interval must divide 60, got {}",
                self.seconds_per_interval
            )));
        }
        if self.duration_minutes == 0 {
            return Err(DtaError::Config("duration_minutes must be positive".into()));
        }
        Ok(())
    }

    /// Number of simulation intervals in one simulated minute.
    #[inline]
    pub fn intervals_per_minute(&self) -> u64 {
        (60 / self.seconds_per_interval) as u64
    }

    /// Total interval count for one loading run.
    #[inline]
    pub fn total_intervals(&self) -> u64 {
        self.duration_minutes as u64 * self.intervals_per_minute()
    }

    /// The interval at which the run ends (exclusive upper bound).
    #[inline]
    pub fn end_interval(&self) -> Interval {
        Interval(self.total_intervals())
    }

    // ── Minute ↔ interval conversion ──────────────────────────────────────

    /// How many intervals span `minutes`? (rounds up — a traversal is never
    /// shorter than its free-flow time)
    #[inline]
    pub fn minutes_to_intervals(&self, minutes: f64) -> u64 {
        (minutes * 60.0 / self.seconds_per_interval as f64).ceil() as u64
    }

    /// Simulated minutes spanned by `n` intervals (relative to interval 0).
    #[inline]
    pub fn intervals_to_minutes(&self, n: u64) -> f64 {
        n as f64 * self.seconds_per_interval as f64 / 60.0
    }

    /// Wall-clock minute label for `interval` (start offset applied).
    #[inline]
    pub fn minute_of(&self, interval: Interval) -> f64 {
        self.start_minute as f64 + self.intervals_to_minutes(interval.0)
    }
}
