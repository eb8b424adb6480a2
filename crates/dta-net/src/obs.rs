//! Field observations used for demand calibration.

/// Minimum count for an observation to participate in deviation and gap
/// computation.  Values below this are treated as "no usable observation" —
/// this is what keeps relative-gap division away from near-zero denominators.
pub const MIN_OBS_COUNT: f64 = 1.0;

/// An observed count (link volume, zone production, or zone attraction)
/// together with its bound semantics.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Observation {
    /// The observed count.
    pub count: f64,

    /// When `true` the count is a ceiling: an estimate above it is penalized,
    /// an estimate below it is not an error.
    pub upper_bounded: bool,
}

impl Observation {
    /// An exact (two-sided) observation.
    pub fn exact(count: f64) -> Self {
        Self { count, upper_bounded: false }
    }

    /// An upper-bound (one-sided) observation.
    pub fn upper_bound(count: f64) -> Self {
        Self { count, upper_bounded: true }
    }

    /// Whether this observation is large enough to calibrate against.
    #[inline]
    pub fn countable(&self) -> bool {
        self.count >= MIN_OBS_COUNT
    }

    /// The signed contribution of deviation `dev` to a path gradient cost.
    ///
    /// Exact observations contribute the raw deviation (negative deviations
    /// pull volume up).  Upper-bounded observations contribute only positive
    /// deviations — being under a ceiling is not an error.
    #[inline]
    pub fn gradient_term(&self, dev: f64) -> f64 {
        if !self.upper_bounded || dev > 0.0 { dev } else { 0.0 }
    }
}
