//! Directed road link.

use dta_core::{DemandPeriodId, NodeId};

use crate::Observation;

/// A directed road link between two nodes.
///
/// Static attributes (`length_m`, `fftt_minutes`, `capacity_vph`) are set at
/// build time.  The calibration fields (`period_flow_vol`, `est_dev`) are
/// mutated by the demand estimation engine, which holds the network
/// exclusively for the duration of a run; per-run queue state lives in the
/// loading engine's queue store, not here.
#[derive(Clone, Debug)]
pub struct Link {
    /// Upstream node.
    pub from: NodeId,

    /// Downstream node.  Discharge from this link competes with the other
    /// links entering `to`.
    pub to: NodeId,

    /// Physical length in metres.
    pub length_m: f64,

    /// Free-flow travel time in minutes, indexed by `DemandPeriodId`.
    pub fftt_minutes: Vec<f64>,

    /// Discharge capacity in vehicles per hour.  The loading engine converts
    /// this to a per-interval budget.
    pub capacity_vph: f64,

    /// Observed volume for calibration.  `None` when the link has no count
    /// station.
    pub obs: Option<Observation>,

    /// Flow accumulated over the calibrated demand period.  Reset at the
    /// start of every calibration iteration.
    pub period_flow_vol: f64,

    /// Estimated − observed volume from the last calibration iteration.
    /// `None` when `obs` is absent or below the countable threshold.
    pub est_dev: Option<f64>,
}

impl Link {
    /// Free-flow travel time in minutes for `period`, or `None` if the link
    /// carries no entry for that period.
    #[inline]
    pub fn period_fftt(&self, period: DemandPeriodId) -> Option<f64> {
        self.fftt_minutes.get(period.index()).copied()
    }

    /// Zero the accumulated period flow.
    #[inline]
    pub fn reset_period_flow_vol(&mut self) {
        self.period_flow_vol = 0.0;
    }

    /// Add `vol` vehicle-equivalents to the accumulated period flow.
    #[inline]
    pub fn increase_period_flow_vol(&mut self, vol: f64) {
        self.period_flow_vol += vol;
    }

    /// The observation, if present and large enough to calibrate against.
    #[inline]
    pub fn countable_obs(&self) -> Option<Observation> {
        self.obs.filter(Observation::countable)
    }
}
