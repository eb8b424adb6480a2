//! Fluent builder for constructing a [`NetworkLoader`].

use dta_core::{AgentId, DemandPeriodId, LinkId, SimRng, SimulationConfig};
use dta_demand::AgentStore;
use dta_net::RoadNetwork;

use crate::{NetworkLoader, QueueStore, SimError, SimResult};

/// Fluent builder for [`NetworkLoader`].
///
/// # Required inputs
///
/// - [`SimulationConfig`] — loading window, resolution, seed
/// - [`RoadNetwork`] — links, nodes (zones are unused by loading)
/// - [`AgentStore`] — agents with paths assigned by the assignment engine
///
/// # Optional inputs
///
/// | Method       | Default            |
/// |--------------|--------------------|
/// | `.period(p)` | `DemandPeriodId(0)`|
///
/// # Example
///
/// ```rust,ignore
/// let mut loader = LoaderBuilder::new(config, network, agents).build()?;
/// let summary = loader.run(LoadingProfile::Uniform, &mut NoopObserver)?;
/// let (network, agents) = loader.into_parts();
/// ```
pub struct LoaderBuilder {
    config:  SimulationConfig,
    network: RoadNetwork,
    agents:  AgentStore,
    period:  DemandPeriodId,
}

impl LoaderBuilder {
    /// Create a builder with all required inputs.
    pub fn new(config: SimulationConfig, network: RoadNetwork, agents: AgentStore) -> Self {
        Self {
            config,
            network,
            agents,
            period: DemandPeriodId(0),
        }
    }

    /// Use `period`'s free-flow travel times for traversal (default: period 0).
    pub fn period(mut self, period: DemandPeriodId) -> Self {
        self.period = period;
        self
    }

    /// Validate inputs and return a ready-to-run [`NetworkLoader`].
    ///
    /// # Errors
    ///
    /// - invalid [`SimulationConfig`] (resolution, window)
    /// - an agent path referencing a link outside the network
    /// - a link without a free-flow travel time for the chosen period
    pub fn build(self) -> SimResult<NetworkLoader> {
        self.config.validate()?;

        // Fail fast on dangling path references instead of mid-run.
        let link_count = self.network.link_count() as u32;
        for (i, agent) in self.agents.iter().enumerate() {
            if let Some(&bad) = agent.link_path.iter().find(|l| l.0 >= link_count) {
                return Err(SimError::DanglingLink {
                    agent: AgentId(i as u32),
                    link:  bad,
                });
            }
        }

        // Every link must carry a travel time for the period we will load.
        for (li, link) in self.network.links.iter().enumerate() {
            if link.period_fftt(self.period).is_none() {
                return Err(SimError::MissingPeriodFftt {
                    link:   LinkId(li as u32),
                    period: self.period,
                });
            }
        }

        let queues = QueueStore::new(&self.network, &self.config);
        let rng = SimRng::new(self.config.seed);

        Ok(NetworkLoader {
            period:  self.period,
            network: self.network,
            agents:  self.agents,
            queues,
            rng,
            config:  self.config,
        })
    }
}
