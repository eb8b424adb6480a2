//! `dta-net` — road network entities for the `rust_dta` framework.
//!
//! Holds the static network the two engines operate on: directed [`Link`]s
//! with per-period free-flow travel times and discharge capacities, [`Node`]s
//! with their incoming-link rotation order, and [`Zone`]s with calibration
//! observations.  Built incrementally with [`RoadNetworkBuilder`].
//!
//! What does *not* live here: per-run queue state (owned by the loading
//! engine) and path/column volumes (owned by `dta-demand`).

pub mod link;
pub mod network;
pub mod node;
pub mod obs;
pub mod zone;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use link::Link;
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use node::Node;
pub use obs::{MIN_OBS_COUNT, Observation};
pub use zone::Zone;
