//! The `QueueStore` — per-link point-queue run state.
//!
//! Queue state is deliberately separated from the static [`RoadNetwork`]:
//! a loading run checks out fresh queues and capacity budgets, mutates them
//! for the duration of the run, and leaves the network untouched.  The
//! network stays shareable between runs and engines; the queue store is
//! rebuilt per run.

use std::collections::VecDeque;

use dta_core::{AgentId, LinkId, SimulationConfig};
use dta_net::RoadNetwork;

// ── LinkQueues ────────────────────────────────────────────────────────────────

/// Point-queue state for one link.
///
/// Agents enter the entry queue on arriving at the link, move to the exit
/// queue (in order) once per interval, and leave the exit queue when the
/// downstream node discharges them.  Both queues are strict FIFO.
#[derive(Clone, Debug, Default)]
pub struct LinkQueues {
    /// Agents that arrived at the link and have not yet been promoted.
    pub entry: VecDeque<AgentId>,

    /// Agents awaiting discharge, in promotion order.
    pub exit: VecDeque<AgentId>,

    /// Remaining discharge capacity per interval.  Consumed, never
    /// replenished, within one run; decrements saturate at zero so the
    /// budget can never go negative even with fractional capacities.
    pub outflow_cap: Vec<f64>,
}

impl LinkQueues {
    /// Consume one vehicle of capacity for `interval`.
    #[inline]
    pub fn consume_capacity(&mut self, interval: usize) {
        self.outflow_cap[interval] = (self.outflow_cap[interval] - 1.0).max(0.0);
    }

    /// Remaining capacity for `interval`.
    #[inline]
    pub fn remaining_capacity(&self, interval: usize) -> f64 {
        self.outflow_cap[interval]
    }
}

// ── WaitingStats ──────────────────────────────────────────────────────────────

/// Per-link waiting-time samples, bucketed by the simulated minute the agent
/// arrived at the link.
///
/// A sample is the agent's time on the link beyond its free-flow traversal
/// time, in intervals.
#[derive(Clone, Debug)]
pub struct WaitingStats {
    /// Summed waiting intervals per arrival minute.
    pub total_by_minute: Vec<f64>,

    /// Sample count per arrival minute.
    pub count_by_minute: Vec<u32>,
}

impl WaitingStats {
    pub fn new(minutes: usize) -> Self {
        Self {
            total_by_minute: vec![0.0; minutes],
            count_by_minute: vec![0; minutes],
        }
    }

    /// Record one waiting-time sample for an agent that arrived during
    /// `minute`.
    pub fn record(&mut self, minute: usize, waiting_intervals: u64) {
        if let Some(slot) = self.total_by_minute.get_mut(minute) {
            *slot += waiting_intervals as f64;
            self.count_by_minute[minute] += 1;
        }
    }

    /// Mean waiting intervals for agents arriving during `minute`, or `None`
    /// with no samples.
    pub fn mean(&self, minute: usize) -> Option<f64> {
        let count = *self.count_by_minute.get(minute)?;
        if count == 0 {
            return None;
        }
        Some(self.total_by_minute[minute] / count as f64)
    }

    /// Total samples recorded across all minutes.
    pub fn sample_count(&self) -> u64 {
        self.count_by_minute.iter().map(|&c| c as u64).sum()
    }
}

// ── QueueStore ────────────────────────────────────────────────────────────────

/// All per-run queue state, indexed by `LinkId`.
pub struct QueueStore {
    /// Entry/exit queues and capacity budgets per link.
    pub queues: Vec<LinkQueues>,

    /// Waiting-time statistics per link.
    pub waiting: Vec<WaitingStats>,
}

impl QueueStore {
    /// Build empty queues with full capacity budgets for every link.
    ///
    /// A link's per-interval budget is its hourly capacity scaled to the
    /// interval length; budgets may be fractional.
    pub fn new(network: &RoadNetwork, config: &SimulationConfig) -> Self {
        let intervals = config.total_intervals() as usize;
        let minutes   = config.duration_minutes as usize;

        let queues = network
            .links
            .iter()
            .map(|link| {
                let per_interval =
                    link.capacity_vph * config.seconds_per_interval as f64 / 3_600.0;
                LinkQueues {
                    entry:       VecDeque::new(),
                    exit:        VecDeque::new(),
                    outflow_cap: vec![per_interval; intervals],
                }
            })
            .collect();

        let waiting = (0..network.link_count())
            .map(|_| WaitingStats::new(minutes))
            .collect();

        Self { queues, waiting }
    }

    /// Queue state for `link`, or `None` for a dangling reference.
    #[inline]
    pub fn queue(&self, link: LinkId) -> Option<&LinkQueues> {
        self.queues.get(link.index())
    }

    #[inline]
    pub fn queue_mut(&mut self, link: LinkId) -> Option<&mut LinkQueues> {
        self.queues.get_mut(link.index())
    }
}
