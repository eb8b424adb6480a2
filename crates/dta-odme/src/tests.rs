//! Integration tests for dta-odme.

use dta_core::{AgentTypeId, DemandPeriodId, LinkId, ZoneId};
use dta_demand::{Column, ColumnPool, ColumnPoolKey, DemandPeriods};
use dta_net::{Observation, RoadNetwork, RoadNetworkBuilder};

use crate::{Calibrator, CalibrationObserver, IterationGaps, NoopObserver, OdmeError, OdmeSettings};

const EPS: f64 = 1e-9;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// One link n0 → n1 with optional observation, two unobserved zones.
fn one_link_network(obs: Option<Observation>) -> RoadNetwork {
    let mut b = RoadNetworkBuilder::new();
    let n0 = b.add_node();
    let n1 = b.add_node();
    let l0 = b.add_link(n0, n1, 500.0, 1.0, 1_800.0);
    if let Some(o) = obs {
        b.observe_link(l0, o);
    }
    b.add_zone(None, None);
    b.add_zone(None, None);
    b.build()
}

fn od_key(period: u16) -> ColumnPoolKey {
    ColumnPoolKey {
        agent_type: AgentTypeId(0),
        period:     DemandPeriodId(period),
        orig:       ZoneId(0),
        dest:       ZoneId(1),
    }
}

fn am_period() -> DemandPeriods {
    let mut periods = DemandPeriods::new();
    periods.add("AM", 420, 480);
    periods
}

/// Calibrator over one link carrying a single 100-vehicle column.
fn one_column_calibrator(obs: Option<Observation>) -> Calibrator {
    let mut pool = ColumnPool::new();
    pool.add_column(od_key(0), Column::new(vec![LinkId(0)], 100.0));
    Calibrator::new(one_link_network(obs), pool, am_period())
}

fn column_volume(cal: &Calibrator) -> f64 {
    cal.pool.get(&od_key(0)).unwrap()[0].volume
}

// ── Worked example ────────────────────────────────────────────────────────────

#[cfg(test)]
mod worked_example {
    use super::*;

    #[test]
    fn over_estimate_reduces_volume() {
        // Volume 100 against an exact observation of 80: deviation 20,
        // gradient 20, raw change 0.01 × 20 = 0.2, clamp range ±5 leaves it
        // untouched, new volume 99.8.
        let mut cal = one_column_calibrator(Some(Observation::exact(80.0)));
        let gaps = cal.calibrate(1, DemandPeriodId(0), &mut NoopObserver).unwrap();

        assert_eq!(gaps.len(), 1);
        assert!((gaps[0].total_abs - 20.0).abs() < EPS);
        assert!((gaps[0].link_rel - 0.25).abs() < EPS);

        assert_eq!(cal.network.links[0].est_dev, Some(20.0));
        let col = &cal.pool.get(&od_key(0)).unwrap()[0];
        assert!((col.gradient_cost - 20.0).abs() < EPS);
        assert!((col.volume - 99.8).abs() < EPS);
    }

    #[test]
    fn under_estimate_raises_volume() {
        let mut cal = one_column_calibrator(Some(Observation::exact(120.0)));
        cal.calibrate(1, DemandPeriodId(0), &mut NoopObserver).unwrap();
        // deviation −20 pulls the volume up: 100 − 0.01 × (−20) = 100.2
        assert!((column_volume(&cal) - 100.2).abs() < EPS);
    }

    #[test]
    fn gap_shrinks_over_iterations() {
        let mut cal = one_column_calibrator(Some(Observation::exact(80.0)));
        let gaps = cal.calibrate(5, DemandPeriodId(0), &mut NoopObserver).unwrap();
        for pair in gaps.windows(2) {
            assert!(pair[1].total_abs < pair[0].total_abs, "gap did not shrink: {pair:?}");
        }
    }
}

// ── Upper-bounded observations ────────────────────────────────────────────────

#[cfg(test)]
mod upper_bound {
    use super::*;

    #[test]
    fn under_a_ceiling_is_not_an_error() {
        // Estimate 100 under a ceiling of 120: deviation is −20 and shows up
        // in the diagnostics, but contributes nothing to the gradient.
        let mut cal = one_column_calibrator(Some(Observation::upper_bound(120.0)));
        let gaps = cal.calibrate(1, DemandPeriodId(0), &mut NoopObserver).unwrap();

        assert!((gaps[0].total_abs - 20.0).abs() < EPS);
        let col = &cal.pool.get(&od_key(0)).unwrap()[0];
        assert_eq!(col.gradient_cost, 0.0);
        assert_eq!(col.volume, 100.0);
    }

    #[test]
    fn over_a_ceiling_pushes_volume_down() {
        let mut cal = one_column_calibrator(Some(Observation::upper_bound(80.0)));
        cal.calibrate(1, DemandPeriodId(0), &mut NoopObserver).unwrap();
        assert!((column_volume(&cal) - 99.8).abs() < EPS);
    }
}

// ── Update bounds ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod bounds {
    use super::*;

    #[test]
    fn change_is_clamped_to_delta_fraction() {
        // An aggressive step size would move the volume by 99; the clamp
        // limits one round to 5% of the pre-update volume.
        let mut cal = one_column_calibrator(Some(Observation::exact(1.0))).with_settings(
            OdmeSettings { step_size: 1.0, delta: 0.05 },
        );
        cal.calibrate(1, DemandPeriodId(0), &mut NoopObserver).unwrap();
        assert!((column_volume(&cal) - 95.0).abs() < EPS);
    }

    #[test]
    fn volume_never_drops_below_one() {
        // A 1-vehicle column sharing its link with a heavy fixed column: the
        // deviation pushes hard, but the floor holds.
        let mut pool = ColumnPool::new();
        pool.add_column(od_key(0), Column::new(vec![LinkId(0)], 1.0));
        pool.add_column(od_key(0), Column::fixed_route(vec![LinkId(0)], 100.0));
        let mut cal = Calibrator::new(
            one_link_network(Some(Observation::exact(1.0))),
            pool,
            am_period(),
        );
        cal.calibrate(10, DemandPeriodId(0), &mut NoopObserver).unwrap();
        assert_eq!(cal.pool.get(&od_key(0)).unwrap()[0].volume, 1.0);
    }

    #[test]
    fn per_iteration_change_bounded_across_a_long_run() {
        let mut cal = one_column_calibrator(Some(Observation::exact(80.0)));
        let mut prev = column_volume(&cal);
        for _ in 0..30 {
            cal.calibrate(1, DemandPeriodId(0), &mut NoopObserver).unwrap();
            let v = column_volume(&cal);
            assert!((v - prev).abs() <= 0.05 * prev + EPS);
            assert!(v >= 1.0);
            prev = v;
        }
    }
}

// ── Exemptions and idempotence ────────────────────────────────────────────────

#[cfg(test)]
mod exemptions {
    use super::*;

    #[test]
    fn fixed_columns_are_never_adjusted() {
        let mut pool = ColumnPool::new();
        pool.add_column(od_key(0), Column::fixed_route(vec![LinkId(0)], 100.0));
        let mut cal = Calibrator::new(
            one_link_network(Some(Observation::exact(80.0))),
            pool,
            am_period(),
        );
        let gaps = cal.calibrate(3, DemandPeriodId(0), &mut NoopObserver).unwrap();

        // The fixed column's flow is still real: it accumulates and deviates.
        assert!((gaps[0].total_abs - 20.0).abs() < EPS);
        // But its volume is pinned.
        assert_eq!(cal.pool.get(&od_key(0)).unwrap()[0].volume, 100.0);
    }

    #[test]
    fn zero_deviation_changes_nothing() {
        let mut cal = one_column_calibrator(Some(Observation::exact(100.0)));
        let gaps = cal.calibrate(1, DemandPeriodId(0), &mut NoopObserver).unwrap();
        assert!(gaps[0].is_zero());
        let col = &cal.pool.get(&od_key(0)).unwrap()[0];
        assert_eq!(col.gradient_cost, 0.0);
        assert_eq!(col.volume, 100.0);
    }

    #[test]
    fn sub_threshold_observation_is_excluded() {
        // A count below 1 gates out deviation, gaps, and gradient alike.
        let mut cal = one_column_calibrator(Some(Observation::exact(0.5)));
        let gaps = cal.calibrate(1, DemandPeriodId(0), &mut NoopObserver).unwrap();
        assert!(gaps[0].is_zero());
        assert_eq!(cal.network.links[0].est_dev, None);
        assert_eq!(column_volume(&cal), 100.0);
    }
}

// ── Zone observations ─────────────────────────────────────────────────────────

#[cfg(test)]
mod zones {
    use super::*;

    #[test]
    fn production_and_attraction_contribute_to_the_gradient() {
        let mut b = RoadNetworkBuilder::new();
        let n0 = b.add_node();
        let n1 = b.add_node();
        let l0 = b.add_link(n0, n1, 500.0, 1.0, 1_800.0);
        b.add_zone(Some(Observation::exact(80.0)), None); // origin: production observed
        b.add_zone(None, Some(Observation::exact(90.0))); // destination: attraction observed
        let network = b.build();

        let mut pool = ColumnPool::new();
        pool.add_column(od_key(0), Column::new(vec![l0], 100.0));
        let mut cal = Calibrator::new(network, pool, am_period());
        let gaps = cal.calibrate(1, DemandPeriodId(0), &mut NoopObserver).unwrap();

        // prod deviation 20, attr deviation 10, no link observation.
        assert!((gaps[0].total_abs - 30.0).abs() < EPS);
        assert!((gaps[0].prod_rel - 0.25).abs() < EPS);
        assert!((gaps[0].attr_rel - 10.0 / 90.0).abs() < EPS);
        assert_eq!(cal.network.zones[0].prod_est_dev, Some(20.0));
        assert_eq!(cal.network.zones[1].attr_est_dev, Some(10.0));

        // gradient 30 → volume 100 − 0.3
        assert!((column_volume(&cal) - 99.7).abs() < EPS);
    }
}

// ── Demand period handling ────────────────────────────────────────────────────

#[cfg(test)]
mod periods {
    use super::*;

    #[test]
    fn unknown_period_fails_before_touching_state() {
        let mut cal = one_column_calibrator(Some(Observation::exact(80.0)));
        let result = cal.calibrate(1, DemandPeriodId(7), &mut NoopObserver);
        assert!(matches!(result, Err(OdmeError::Core(_))));
        // Nothing ran: the volume is untouched.
        assert_eq!(column_volume(&cal), 100.0);
    }

    #[test]
    fn other_periods_are_filtered_out() {
        // A period-1 column on the same link is neither accumulated nor
        // adjusted when calibrating period 0.
        let mut pool = ColumnPool::new();
        pool.add_column(od_key(0), Column::new(vec![LinkId(0)], 100.0));
        pool.add_column(od_key(1), Column::new(vec![LinkId(0)], 50.0));
        let mut cal = Calibrator::new(
            one_link_network(Some(Observation::exact(100.0))),
            pool,
            am_period(),
        );
        let gaps = cal.calibrate(1, DemandPeriodId(0), &mut NoopObserver).unwrap();

        // Only the period-0 volume flows onto the link → estimate matches.
        assert!(gaps[0].is_zero());
        assert_eq!(cal.pool.get(&od_key(0)).unwrap()[0].volume, 100.0);
        assert_eq!(cal.pool.get(&od_key(1)).unwrap()[0].volume, 50.0);
    }
}

// ── Dangling references ───────────────────────────────────────────────────────

#[cfg(test)]
mod dangling {
    use super::*;

    #[test]
    fn dangling_link_aborts_the_run() {
        let mut pool = ColumnPool::new();
        pool.add_column(od_key(0), Column::new(vec![LinkId(9)], 100.0));
        let mut cal = Calibrator::new(one_link_network(None), pool, am_period());
        let result = cal.calibrate(1, DemandPeriodId(0), &mut NoopObserver);
        assert!(matches!(result, Err(OdmeError::DanglingLink(LinkId(9)))));
    }

    #[test]
    fn unknown_zone_aborts_the_run() {
        let key = ColumnPoolKey { orig: ZoneId(9), ..od_key(0) };
        let mut pool = ColumnPool::new();
        pool.add_column(key, Column::new(vec![LinkId(0)], 100.0));
        let mut cal = Calibrator::new(one_link_network(None), pool, am_period());
        let result = cal.calibrate(1, DemandPeriodId(0), &mut NoopObserver);
        assert!(matches!(result, Err(OdmeError::UnknownZone(ZoneId(9)))));
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[derive(Default)]
    struct GapRecorder {
        rows: Vec<IterationGaps>,
    }

    impl CalibrationObserver for GapRecorder {
        fn on_iteration(&mut self, gaps: &IterationGaps) {
            self.rows.push(*gaps);
        }
    }

    #[test]
    fn observer_sees_every_iteration() {
        let mut cal = one_column_calibrator(Some(Observation::exact(80.0)));
        let mut recorder = GapRecorder::default();
        let history = cal.calibrate(4, DemandPeriodId(0), &mut recorder).unwrap();

        assert_eq!(recorder.rows.len(), 4);
        assert_eq!(recorder.rows, history);
        assert_eq!(recorder.rows[2].iteration, 2);
    }
}
