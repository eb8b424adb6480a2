//! Road network container and builder.
//!
//! # Data layout
//!
//! Entities live in plain `Vec`s indexed by their typed IDs; collection
//! lengths are the single source of truth for entity counts (no sentinel
//! records).  Per-node incoming-link lists are derived once at `build()` so
//! the loading engine's rotating discharge order needs no per-interval graph
//! scan.

use dta_core::{LinkId, NodeId, ZoneId};

use crate::{Link, Node, Observation, Zone};

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// The static road network: nodes, directed links, and zones.
///
/// All fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`RoadNetworkBuilder`].  Engines that mutate the
/// calibration fields take the network by value or `&mut` — exclusive access
/// for the duration of a run is enforced by the borrow checker, not by
/// convention.
pub struct RoadNetwork {
    /// Indexed by `NodeId`.
    pub nodes: Vec<Node>,

    /// Indexed by `LinkId`.
    pub links: Vec<Link>,

    /// Indexed by `ZoneId`.
    pub zones: Vec<Zone>,
}

impl RoadNetwork {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    // ── Checked access ────────────────────────────────────────────────────

    /// The link with `id`, or `None` for a dangling reference.
    #[inline]
    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id.index())
    }

    #[inline]
    pub fn link_mut(&mut self, id: LinkId) -> Option<&mut Link> {
        self.links.get_mut(id.index())
    }

    /// The zone with `id`, or `None` for a dangling reference.
    #[inline]
    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(id.index())
    }

    #[inline]
    pub fn zone_mut(&mut self, id: ZoneId) -> Option<&mut Zone> {
        self.zones.get_mut(id.index())
    }

    /// Iterator over all `LinkId`s in ascending index order.
    pub fn link_ids(&self) -> impl Iterator<Item = LinkId> + '_ {
        (0..self.links.len() as u32).map(LinkId)
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// Nodes, links and zones may be added in any order; `build()` derives each
/// node's incoming-link list from the link set.  Link `from`/`to` must be
/// `NodeId`s previously returned by [`add_node`](Self::add_node).
///
/// # Example
///
/// ```
/// use dta_net::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let n0 = b.add_node();
/// let n1 = b.add_node();
/// // 1.2 km, 1-minute free-flow time, 1800 veh/h discharge capacity
/// let l = b.add_link(n0, n1, 1_200.0, 1.0, 1_800.0);
/// let net = b.build();
/// assert_eq!(net.nodes[n1.index()].incoming, vec![l]);
/// ```
pub struct RoadNetworkBuilder {
    node_count: usize,
    links:      Vec<Link>,
    zones:      Vec<Zone>,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self { node_count: 0, links: Vec::new(), zones: Vec::new() }
    }

    /// Pre-allocate for the expected entity counts to reduce reallocations
    /// when bulk-loading a large network.
    pub fn with_capacity(links: usize, zones: usize) -> Self {
        Self {
            node_count: 0,
            links:      Vec::with_capacity(links),
            zones:      Vec::with_capacity(zones),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId(self.node_count as u32);
        self.node_count += 1;
        id
    }

    /// Add a **directed** link from `from` to `to` and return its `LinkId`.
    ///
    /// - `length_m`: physical length in metres.
    /// - `fftt_minutes`: free-flow travel time in minutes for demand period 0.
    ///   Further periods can be pushed onto `Link::fftt_minutes` before the
    ///   network is built into an engine.
    /// - `capacity_vph`: discharge capacity in vehicles per hour.
    pub fn add_link(
        &mut self,
        from:         NodeId,
        to:           NodeId,
        length_m:     f64,
        fftt_minutes: f64,
        capacity_vph: f64,
    ) -> LinkId {
        let id = LinkId(self.links.len() as u32);
        self.links.push(Link {
            from,
            to,
            length_m,
            fftt_minutes: vec![fftt_minutes],
            capacity_vph,
            obs: None,
            period_flow_vol: 0.0,
            est_dev: None,
        });
        id
    }

    /// Attach an observed count to a previously added link.
    pub fn observe_link(&mut self, link: LinkId, obs: Observation) -> &mut Self {
        self.links[link.index()].obs = Some(obs);
        self
    }

    /// Add a zone with optional production/attraction observations.
    pub fn add_zone(
        &mut self,
        prod_obs: Option<Observation>,
        attr_obs: Option<Observation>,
    ) -> ZoneId {
        let id = ZoneId(self.zones.len() as u32);
        self.zones.push(Zone {
            prod_obs,
            attr_obs,
            ..Zone::default()
        });
        id
    }

    pub fn node_count(&self) -> usize { self.node_count }
    pub fn link_count(&self) -> usize { self.links.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// Derives each node's incoming-link list in link insertion order —
    /// the order the discharge rotation cycles through.
    pub fn build(self) -> RoadNetwork {
        let mut nodes = vec![Node::default(); self.node_count];
        for (i, link) in self.links.iter().enumerate() {
            nodes[link.to.index()].incoming.push(LinkId(i as u32));
        }

        RoadNetwork {
            nodes,
            links: self.links,
            zones: self.zones,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
