//! Traffic analysis zone.

use crate::Observation;

/// A traffic analysis zone: the origin/destination unit of demand.
///
/// Productions count trips leaving the zone, attractions count trips ending
/// in it.  The `*_est` and `*_est_dev` fields are recomputed every
/// calibration iteration; deviations stay `None` while the corresponding
/// observation is absent or below the countable threshold, so a
/// below-threshold deviation cannot be read at all.
#[derive(Clone, Debug, Default)]
pub struct Zone {
    /// Observed trip production, if surveyed.
    pub prod_obs: Option<Observation>,

    /// Observed trip attraction, if surveyed.
    pub attr_obs: Option<Observation>,

    /// Production estimated from current path volumes.
    pub prod_est: f64,

    /// Attraction estimated from current path volumes.
    pub attr_est: f64,

    /// Estimated − observed production from the last calibration iteration.
    pub prod_est_dev: Option<f64>,

    /// Estimated − observed attraction from the last calibration iteration.
    pub attr_est_dev: Option<f64>,
}

impl Zone {
    /// Zero both estimates (start of a calibration iteration).
    #[inline]
    pub fn reset_estimates(&mut self) {
        self.prod_est = 0.0;
        self.attr_est = 0.0;
    }

    /// The production observation, if large enough to calibrate against.
    #[inline]
    pub fn countable_prod_obs(&self) -> Option<Observation> {
        self.prod_obs.filter(Observation::countable)
    }

    /// The attraction observation, if large enough to calibrate against.
    #[inline]
    pub fn countable_attr_obs(&self) -> Option<Observation> {
        self.attr_obs.filter(Observation::countable)
    }
}
