//! Unit tests for dta-net.

use dta_core::{DemandPeriodId, LinkId};

use crate::{Observation, RoadNetworkBuilder};

fn merge_network() -> crate::RoadNetwork {
    // Two links feeding node 2, one link leaving it:
    //   0 ─l0→ 2 ─l2→ 3
    //   1 ─l1→ 2
    let mut b = RoadNetworkBuilder::new();
    let n0 = b.add_node();
    let n1 = b.add_node();
    let n2 = b.add_node();
    let n3 = b.add_node();
    b.add_link(n0, n2, 500.0, 1.0, 1_800.0);
    b.add_link(n1, n2, 500.0, 1.0, 1_800.0);
    b.add_link(n2, n3, 800.0, 2.0, 3_600.0);
    b.build()
}

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn incoming_lists_derived_in_insertion_order() {
        let net = merge_network();
        assert_eq!(net.nodes[2].incoming, vec![LinkId(0), LinkId(1)]);
        assert_eq!(net.nodes[3].incoming, vec![LinkId(2)]);
        assert!(net.nodes[0].incoming.is_empty());
    }

    #[test]
    fn counts() {
        let net = merge_network();
        assert_eq!(net.node_count(), 4);
        assert_eq!(net.link_count(), 3);
        assert_eq!(net.zone_count(), 0);
    }

    #[test]
    fn checked_link_access() {
        let net = merge_network();
        assert!(net.link(LinkId(2)).is_some());
        assert!(net.link(LinkId(3)).is_none());
        assert!(net.link(LinkId::INVALID).is_none());
    }

    #[test]
    fn observe_link_attaches_observation() {
        let mut b = RoadNetworkBuilder::new();
        let n0 = b.add_node();
        let n1 = b.add_node();
        let l = b.add_link(n0, n1, 100.0, 0.5, 900.0);
        b.observe_link(l, Observation::upper_bound(80.0));
        let net = b.build();
        let obs = net.links[l.index()].obs.unwrap();
        assert_eq!(obs.count, 80.0);
        assert!(obs.upper_bounded);
    }
}

#[cfg(test)]
mod link {
    use super::*;

    #[test]
    fn period_fftt_lookup() {
        let mut net = merge_network();
        let link = &mut net.links[0];
        link.fftt_minutes.push(1.5); // second demand period
        assert_eq!(link.period_fftt(DemandPeriodId(0)), Some(1.0));
        assert_eq!(link.period_fftt(DemandPeriodId(1)), Some(1.5));
        assert_eq!(link.period_fftt(DemandPeriodId(2)), None);
    }

    #[test]
    fn flow_accumulation_and_reset() {
        let mut net = merge_network();
        let link = &mut net.links[0];
        link.increase_period_flow_vol(10.0);
        link.increase_period_flow_vol(2.5);
        assert_eq!(link.period_flow_vol, 12.5);
        link.reset_period_flow_vol();
        assert_eq!(link.period_flow_vol, 0.0);
    }

    #[test]
    fn sub_threshold_obs_is_not_countable() {
        let mut net = merge_network();
        net.links[0].obs = Some(Observation::exact(0.4));
        net.links[1].obs = Some(Observation::exact(1.0));
        assert!(net.links[0].countable_obs().is_none());
        assert!(net.links[1].countable_obs().is_some());
        assert!(net.links[2].countable_obs().is_none()); // no observation at all
    }
}

#[cfg(test)]
mod obs {
    use crate::Observation;

    #[test]
    fn exact_observation_contributes_raw_deviation() {
        let obs = Observation::exact(100.0);
        assert_eq!(obs.gradient_term(20.0), 20.0);
        assert_eq!(obs.gradient_term(-20.0), -20.0);
    }

    #[test]
    fn upper_bound_contributes_only_positive_deviation() {
        let obs = Observation::upper_bound(100.0);
        assert_eq!(obs.gradient_term(20.0), 20.0);
        assert_eq!(obs.gradient_term(-20.0), 0.0);
        assert_eq!(obs.gradient_term(0.0), 0.0);
    }
}

#[cfg(test)]
mod zone {
    use crate::{Observation, Zone};

    #[test]
    fn reset_estimates_zeroes_both() {
        let mut z = Zone::default();
        z.prod_est = 5.0;
        z.attr_est = 7.0;
        z.reset_estimates();
        assert_eq!(z.prod_est, 0.0);
        assert_eq!(z.attr_est, 0.0);
    }

    #[test]
    fn countable_gating_per_category() {
        let z = Zone {
            prod_obs: Some(Observation::exact(0.2)),
            attr_obs: Some(Observation::exact(50.0)),
            ..Zone::default()
        };
        assert!(z.countable_prod_obs().is_none());
        assert!(z.countable_attr_obs().is_some());
    }
}
