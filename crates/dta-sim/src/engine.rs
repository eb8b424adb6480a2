//! The `NetworkLoader` struct and its interval loop.

use dta_core::{Interval, LinkId, SimRng, SimulationConfig, DemandPeriodId, DtaError};
use dta_demand::{AgentStore, DepartureBoard, LoadingProfile, assign_departures};
use dta_net::RoadNetwork;

use crate::{LoadObserver, QueueStore, SimError, SimResult};

// ── LoadSummary ───────────────────────────────────────────────────────────────

/// Cumulative flow counters for one loading run.
///
/// Returned by [`NetworkLoader::run`] rather than kept as engine-wide state,
/// so runs compose and tests can assert on them directly.  At every interval
/// `cum_departures <= cum_arrivals` (flow conservation); the two are equal
/// once every injected agent has completed its path.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Agents injected onto their first link so far.
    pub cum_arrivals: u64,

    /// Agents discharged from their final link so far.
    pub cum_departures: u64,
}

// ── NetworkLoader ─────────────────────────────────────────────────────────────

/// The point-queue network loading engine.
///
/// `NetworkLoader` owns the network, the agents, and the per-run queue state
/// for the duration of a run — exclusive access is a type-level property, not
/// a convention.  Each interval performs three phases, strictly in order:
///
/// 1. **Injection**: agents departing this interval enter the entry queue of
///    the first link of their path; cumulative arrivals increment.
/// 2. **Promotion**: every link's entry queue drains, in order, into its exit
///    queue; each promoted agent's ready interval becomes now plus the link's
///    free-flow traversal time.
/// 3. **Node discharge**: each node serves its incoming links in an order
///    rotated by the interval index, so no link is systematically favored
///    when several compete for throughput.  A link discharges exit-queue
///    agents while it has capacity left this interval and its head agent is
///    ready; a not-yet-ready head blocks the whole link until the next
///    interval (head-of-line blocking — FIFO is never reordered).
///
/// Create via [`LoaderBuilder`][crate::LoaderBuilder]; reclaim the stores
/// with [`into_parts`](Self::into_parts) after the run.
pub struct NetworkLoader {
    /// Run configuration (window, resolution, seed).
    pub config: SimulationConfig,

    /// Demand period whose free-flow travel times drive traversal.
    pub period: DemandPeriodId,

    /// The static road network.
    pub network: RoadNetwork,

    /// Agent trajectory state, mutated every interval an agent is active.
    pub agents: AgentStore,

    /// Per-link queues and capacity budgets.  Rebuilt at the start of every
    /// run; inspect after the run for waiting-time statistics.
    pub queues: QueueStore,

    /// Seeded RNG for the random loading profile.
    pub(crate) rng: SimRng,
}

impl NetworkLoader {
    // ── Public API ────────────────────────────────────────────────────────

    /// Load all agents onto the network under `loading_profile`.
    ///
    /// Paths must already be assigned (each agent's `link_path` populated by
    /// the assignment engine).  With no agents this is a benign no-op
    /// returning a zero summary.
    pub fn run<O: LoadObserver>(
        &mut self,
        loading_profile: LoadingProfile,
        observer:        &mut O,
    ) -> SimResult<LoadSummary> {
        if self.agents.is_empty() {
            return Ok(LoadSummary::default());
        }

        let total = self.config.total_intervals();
        assign_departures(&mut self.agents, loading_profile, total, &mut self.rng);
        let mut board = DepartureBoard::build_from_store(&self.agents);

        // Fresh queues and full capacity budgets for this run.
        self.queues = QueueStore::new(&self.network, &self.config);

        let mut summary = LoadSummary::default();
        let per_minute = self.config.intervals_per_minute();

        for n in 0..total {
            let now = Interval(n);

            if n % per_minute == 0 {
                observer.on_minute((n / per_minute) as u32, &summary);
            }

            self.inject_departures(now, &mut board, &mut summary)?;
            self.promote_entries(now)?;
            self.discharge_nodes(now, &mut summary)?;

            debug_assert!(summary.cum_departures <= summary.cum_arrivals);
            observer.on_interval_end(now, &self.queues, &self.agents, &summary);
        }

        observer.on_run_end(&summary);
        Ok(summary)
    }

    /// Release the network and agent store once loading is done.
    pub fn into_parts(self) -> (RoadNetwork, AgentStore) {
        (self.network, self.agents)
    }

    // ── Phase 1: injection ────────────────────────────────────────────────

    /// Push every agent departing at `now` onto its first link's entry queue.
    fn inject_departures(
        &mut self,
        now:     Interval,
        board:   &mut DepartureBoard,
        summary: &mut LoadSummary,
    ) -> SimResult<()> {
        let Some(departing) = board.drain_interval(now) else {
            return Ok(());
        };

        for id in departing {
            let agent = self.agents.get_mut(id).ok_or(SimError::AgentNotFound(id))?;
            // The path is stored reversed: its last element is the first link.
            let Some(first) = agent.first_link() else {
                continue;
            };
            agent.link_arrival = now;

            self.queues
                .queue_mut(first)
                .ok_or(SimError::DanglingLink { agent: id, link: first })?
                .entry
                .push_back(id);
            summary.cum_arrivals += 1;
        }
        Ok(())
    }

    // ── Phase 2: entry → exit promotion ───────────────────────────────────

    /// Drain every link's entry queue into its exit queue, stamping each
    /// moved agent's ready interval with now + free-flow traversal time.
    fn promote_entries(&mut self, now: Interval) -> SimResult<()> {
        for li in 0..self.queues.queues.len() {
            if self.queues.queues[li].entry.is_empty() {
                continue;
            }
            let fftt_intervals = self.fftt_intervals(LinkId(li as u32))?;

            while let Some(id) = self.queues.queues[li].entry.pop_front() {
                self.queues.queues[li].exit.push_back(id);
                self.agents
                    .get_mut(id)
                    .ok_or(SimError::AgentNotFound(id))?
                    .ready = now + fftt_intervals;
            }
        }
        Ok(())
    }

    // ── Phase 3: node-level discharge ─────────────────────────────────────

    /// Serve every node's incoming links in rotating order.
    ///
    /// The rotation `(interval + position) % incoming_count` shifts which
    /// link is served first each interval, so competing links share node
    /// throughput fairly over time.
    fn discharge_nodes(&mut self, now: Interval, summary: &mut LoadSummary) -> SimResult<()> {
        let i = now.0 as usize;
        for node_idx in 0..self.network.nodes.len() {
            let m = self.network.nodes[node_idx].incoming.len();
            if m == 0 {
                continue;
            }
            for j in 0..m {
                let pos = (i + j) % m;
                let link_id = self.network.nodes[node_idx].incoming[pos];
                self.discharge_link(link_id, now, summary)?;
            }
        }
        Ok(())
    }

    /// Discharge ready agents from `link_id`'s exit queue while capacity
    /// remains this interval.
    fn discharge_link(
        &mut self,
        link_id: LinkId,
        now:     Interval,
        summary: &mut LoadSummary,
    ) -> SimResult<()> {
        let i = now.0 as usize;
        let fftt_intervals = self.fftt_intervals(link_id)?;

        loop {
            let lq = &self.queues.queues[link_id.index()];
            if lq.remaining_capacity(i) <= 0.0 {
                break;
            }
            let Some(&head) = lq.exit.front() else {
                break;
            };

            let agent = self.agents.get_mut(head).ok_or(SimError::AgentNotFound(head))?;
            if agent.ready > now {
                // Head not yet ready: the whole link is blocked this
                // interval.  Never skip ahead to a later-ready agent.
                break;
            }

            if let Some(next) = agent.next_link() {
                // Transfer to the next link of the path.
                let entered = agent.link_arrival;
                let waiting = now.since(entered).saturating_sub(fftt_intervals);
                agent.ready = now;
                agent.link_arrival = now;
                agent.advance_link();

                let minute = self.config.intervals_to_minutes(entered.0).floor() as usize;
                self.queues.waiting[link_id.index()].record(minute, waiting);
                self.queues
                    .queue_mut(next)
                    .ok_or(SimError::DanglingLink { agent: head, link: next })?
                    .entry
                    .push_back(head);
            } else {
                // Final link: the trip is complete.
                agent.arrival = Some(now);
                agent.advance_link();
                summary.cum_departures += 1;
            }

            let lq = &mut self.queues.queues[link_id.index()];
            lq.exit.pop_front();
            lq.consume_capacity(i);
        }
        Ok(())
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// Free-flow traversal time of `link_id` in intervals, for this run's
    /// demand period.
    fn fftt_intervals(&self, link_id: LinkId) -> SimResult<u64> {
        let link = self
            .network
            .link(link_id)
            .ok_or(SimError::Core(DtaError::LinkNotFound(link_id)))?;
        let minutes = link.period_fftt(self.period).ok_or(SimError::MissingPeriodFftt {
            link:   link_id,
            period: self.period,
        })?;
        Ok(self.config.minutes_to_intervals(minutes))
    }
}
