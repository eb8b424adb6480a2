//! The `Calibrator` struct and its iteration loop.

use dta_core::DemandPeriodId;
use dta_demand::{Column, ColumnPool, ColumnPoolKey, DemandPeriods};
use dta_net::RoadNetwork;

use crate::{CalibrationObserver, IterationGaps, OdmeError, OdmeResult};

/// Partial accumulation buffers: per-link flow, per-zone production, per-zone
/// attraction.  Summed over pool entries, then written back in one pass.
type FlowSums = (Vec<f64>, Vec<f64>, Vec<f64>);

// ── OdmeSettings ──────────────────────────────────────────────────────────────

/// Tuning constants for the bounded gradient projection.
#[derive(Copy, Clone, Debug)]
pub struct OdmeSettings {
    /// Gradient step size: volume change per unit of gradient cost.
    pub step_size: f64,

    /// Maximum fractional volume change per iteration.  A column's volume
    /// never moves by more than `delta × volume` in one round, regardless of
    /// how large the gradient is.
    pub delta: f64,
}

impl Default for OdmeSettings {
    fn default() -> Self {
        Self { step_size: 0.01, delta: 0.05 }
    }
}

// ── Calibrator ────────────────────────────────────────────────────────────────

/// The demand estimation engine.
///
/// `Calibrator` owns the network and the column pool for the duration of a
/// calibration — the same exclusive-checkout discipline as the loading
/// engine.  Each iteration performs three passes, strictly in order:
///
/// 1. **Accumulate**: link flows and zone production/attraction estimates are
///    summed over every positive-volume column of the calibrated period
///    (fixed columns included — their flow is real even if their volume is
///    pinned).  The accumulation fully completes before anything reads an
///    estimate; with the `parallel` feature the summation fans out over pool
///    entries and only the reduced totals are written back.
/// 2. **Deviations**: per link and zone with a countable observation,
///    deviation = estimated − observed; gap sums are reported through the
///    observer.
/// 3. **Adjust**: per non-fixed, positive-volume column, a gradient cost is
///    summed from its origin zone's production, its destination zone's
///    attraction, and every traversed link, then the volume moves against
///    the gradient — clamped to ±`delta × volume` and floored at 1.
///
/// Reclaim the stores with [`into_parts`](Self::into_parts) afterwards.
pub struct Calibrator {
    /// The road network; its links and zones carry the estimates and
    /// deviations after each iteration.
    pub network: RoadNetwork,

    /// The column pool; volumes and gradient costs are updated in place.
    pub pool: ColumnPool,

    /// Demand period registry used to validate the calibrated period.
    pub periods: DemandPeriods,

    /// Gradient projection constants.
    pub settings: OdmeSettings,
}

impl Calibrator {
    /// Create a calibrator with default [`OdmeSettings`].
    pub fn new(network: RoadNetwork, pool: ColumnPool, periods: DemandPeriods) -> Self {
        Self {
            network,
            pool,
            periods,
            settings: OdmeSettings::default(),
        }
    }

    /// Override the gradient projection constants.
    pub fn with_settings(mut self, settings: OdmeSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Release the network and column pool once calibration is done.
    pub fn into_parts(self) -> (RoadNetwork, ColumnPool) {
        (self.network, self.pool)
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run `update_iterations` rounds of bounded gradient projection against
    /// the observations, calibrating the columns of `period` only.
    ///
    /// Returns the per-iteration gap diagnostics.
    ///
    /// # Errors
    ///
    /// Fails before touching any state if `period` is not registered.  A
    /// column referencing a link or zone outside the network aborts the run —
    /// partial mid-iteration state is not safely resumable.
    pub fn calibrate<O: CalibrationObserver>(
        &mut self,
        update_iterations: usize,
        period:            DemandPeriodId,
        observer:          &mut O,
    ) -> OdmeResult<Vec<IterationGaps>> {
        // One demand period per call: validate it up front, then work on the
        // pool entries whose key matches.
        self.periods.resolve(period)?;

        let mut history = Vec::with_capacity(update_iterations);
        for iteration in 0..update_iterations {
            self.accumulate_flows(period)?;
            let gaps = self.compute_deviations(iteration);
            observer.on_iteration(&gaps);
            self.adjust_columns(period)?;
            history.push(gaps);
        }
        Ok(history)
    }

    // ── Pass 1: reset & accumulate ────────────────────────────────────────

    /// Recompute every link's period flow and every zone's estimated
    /// production/attraction from the current column volumes.
    ///
    /// Summation goes into fresh buffers (implicitly resetting the previous
    /// iteration's values); the write-back happens only once all sums are
    /// complete, so no reader can observe a partial accumulation.
    fn accumulate_flows(&mut self, period: DemandPeriodId) -> OdmeResult<()> {
        let (link_vol, prod, attr) = self.sum_flows(period)?;

        for (link, vol) in self.network.links.iter_mut().zip(&link_vol) {
            link.period_flow_vol = *vol;
        }
        for ((zone, p), a) in self.network.zones.iter_mut().zip(&prod).zip(&attr) {
            zone.prod_est = *p;
            zone.attr_est = *a;
        }
        Ok(())
    }

    #[cfg(not(feature = "parallel"))]
    fn sum_flows(&self, period: DemandPeriodId) -> OdmeResult<FlowSums> {
        let mut sums = self.empty_sums();
        for (key, columns) in self.pool.period_entries(period) {
            accumulate_group(&mut sums, key, columns)?;
        }
        Ok(sums)
    }

    #[cfg(feature = "parallel")]
    fn sum_flows(&self, period: DemandPeriodId) -> OdmeResult<FlowSums> {
        use rayon::prelude::*;

        let entries: Vec<(&ColumnPoolKey, &Vec<Column>)> =
            self.pool.period_entries(period).collect();

        entries
            .par_iter()
            .try_fold(
                || self.empty_sums(),
                |mut sums, &(key, columns)| {
                    accumulate_group(&mut sums, key, columns)?;
                    Ok(sums)
                },
            )
            .try_reduce(
                || self.empty_sums(),
                |mut a, b| {
                    for (x, y) in a.0.iter_mut().zip(&b.0) { *x += y; }
                    for (x, y) in a.1.iter_mut().zip(&b.1) { *x += y; }
                    for (x, y) in a.2.iter_mut().zip(&b.2) { *x += y; }
                    Ok(a)
                },
            )
    }

    fn empty_sums(&self) -> FlowSums {
        (
            vec![0.0; self.network.link_count()],
            vec![0.0; self.network.zone_count()],
            vec![0.0; self.network.zone_count()],
        )
    }

    // ── Pass 2: deviations and gaps ───────────────────────────────────────

    /// Set `est_dev` on every link and zone with a countable observation and
    /// sum the gap diagnostics.  Deviations stay `None` below the threshold,
    /// so an unusable deviation cannot be read at all.
    fn compute_deviations(&mut self, iteration: usize) -> IterationGaps {
        let mut gaps = IterationGaps { iteration, ..IterationGaps::default() };

        for link in &mut self.network.links {
            link.est_dev = None;
            if let Some(obs) = link.countable_obs() {
                let dev = link.period_flow_vol - obs.count;
                link.est_dev = Some(dev);
                gaps.total_abs += dev.abs();
                gaps.link_rel += dev / obs.count;
            }
        }

        for zone in &mut self.network.zones {
            zone.attr_est_dev = None;
            zone.prod_est_dev = None;

            if let Some(obs) = zone.countable_attr_obs() {
                let dev = zone.attr_est - obs.count;
                zone.attr_est_dev = Some(dev);
                gaps.total_abs += dev.abs();
                gaps.attr_rel += dev / obs.count;
            }
            if let Some(obs) = zone.countable_prod_obs() {
                let dev = zone.prod_est - obs.count;
                zone.prod_est_dev = Some(dev);
                gaps.total_abs += dev.abs();
                gaps.prod_rel += dev / obs.count;
            }
        }

        gaps
    }

    // ── Pass 3: gradient and bounded update ───────────────────────────────

    /// Compute each column's gradient cost and apply the bounded update.
    fn adjust_columns(&mut self, period: DemandPeriodId) -> OdmeResult<()> {
        let step    = self.settings.step_size;
        let delta   = self.settings.delta;
        let network = &self.network;

        for (key, columns) in self.pool.period_entries_mut(period) {
            let orig = network.zone(key.orig).ok_or(OdmeError::UnknownZone(key.orig))?;
            let dest = network.zone(key.dest).ok_or(OdmeError::UnknownZone(key.dest))?;

            for col in columns.iter_mut() {
                if col.fixed || col.volume <= 0.0 {
                    continue;
                }

                let mut gradient = 0.0;

                if let (Some(obs), Some(dev)) = (orig.countable_prod_obs(), orig.prod_est_dev) {
                    gradient += obs.gradient_term(dev);
                }
                if let (Some(obs), Some(dev)) = (dest.countable_attr_obs(), dest.attr_est_dev) {
                    gradient += obs.gradient_term(dev);
                }
                for &l in &col.links {
                    let link = network.link(l).ok_or(OdmeError::DanglingLink(l))?;
                    if let (Some(obs), Some(dev)) = (link.countable_obs(), link.est_dev) {
                        gradient += obs.gradient_term(dev);
                    }
                }

                col.gradient_cost = gradient;

                // Move against the gradient, at most delta × volume per
                // round, never below the volume floor of 1.
                let bound  = delta * col.volume;
                let change = (step * gradient).clamp(-bound, bound);
                col.volume = (col.volume - change).max(1.0);
            }
        }
        Ok(())
    }
}

// ── Shared accumulation helper ────────────────────────────────────────────────

/// Add one OD group's column volumes into the partial sums.
///
/// Every positive-volume column counts — fixed or not — at unit
/// vehicle-equivalent weight per unit volume.
fn accumulate_group(
    sums:    &mut FlowSums,
    key:     &ColumnPoolKey,
    columns: &[Column],
) -> OdmeResult<()> {
    let (link_vol, prod, attr) = sums;
    for col in columns {
        if col.volume <= 0.0 {
            continue;
        }
        *prod
            .get_mut(key.orig.index())
            .ok_or(OdmeError::UnknownZone(key.orig))? += col.volume;
        *attr
            .get_mut(key.dest.index())
            .ok_or(OdmeError::UnknownZone(key.dest))? += col.volume;
        for &l in &col.links {
            *link_vol.get_mut(l.index()).ok_or(OdmeError::DanglingLink(l))? += col.volume;
        }
    }
    Ok(())
}
