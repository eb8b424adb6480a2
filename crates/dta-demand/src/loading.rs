//! Demand loading profiles: how departures are spread over the loading
//! window.

use dta_core::{Interval, SimRng};

use crate::AgentStore;

/// How agents' departure intervals are distributed over
/// `[0, total_intervals)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadingProfile {
    /// Departures evenly spread across the window.
    Uniform,
    /// Departures drawn uniformly at random within the window.
    Random,
    /// Every agent departs at the window's first interval.
    Constant,
}

/// Assign every agent a departure interval under `profile` and reset its
/// trajectory state for a fresh run.
///
/// The uniform spread places agent `k` of `n` at interval `k·total/n`, so
/// the full window is covered without clustering regardless of `n`.  Random
/// draws come from the seeded `rng` stream in ascending agent order, which
/// makes the assignment reproducible for a given seed.
pub fn assign_departures(
    store:           &mut AgentStore,
    profile:         LoadingProfile,
    total_intervals: u64,
    rng:             &mut SimRng,
) {
    let n = store.len() as u64;
    for (k, agent) in store.iter_mut().enumerate() {
        agent.reset_trajectory();
        let dep = match profile {
            LoadingProfile::Uniform  => k as u64 * total_intervals / n,
            LoadingProfile::Random   => rng.gen_range(0..total_intervals),
            LoadingProfile::Constant => 0,
        };
        agent.scheduled_dep = Interval(dep);
        agent.ready         = Interval(dep);
        agent.link_arrival  = Interval(dep);
    }
}
