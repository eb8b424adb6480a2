//! Per-iteration calibration diagnostics.

/// Estimation gap sums for one calibration iteration.
///
/// Returned (and passed to the observer) once per iteration instead of being
/// accumulated in engine-wide state, so calibration runs compose and tests
/// can assert on convergence directly.  Relative gaps only include
/// observations at or above the countable threshold — the threshold is what
/// keeps the divisions away from near-zero denominators.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct IterationGaps {
    /// Which iteration these gaps belong to (0-based).
    pub iteration: usize,

    /// Sum of absolute deviations across links, productions and attractions.
    pub total_abs: f64,

    /// Sum of deviation / observation over countable link observations.
    pub link_rel: f64,

    /// Sum of deviation / observation over countable zone attractions.
    pub attr_rel: f64,

    /// Sum of deviation / observation over countable zone productions.
    pub prod_rel: f64,
}

impl IterationGaps {
    /// `true` when every estimate matched its observation exactly.
    pub fn is_zero(&self) -> bool {
        self.total_abs == 0.0
    }
}
