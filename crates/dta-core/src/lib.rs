//! `dta-core` — foundational types for the `rust_dta` traffic loading
//! framework.
//!
//! This crate is a dependency of every other `dta-*` crate.  It intentionally
//! has no `dta-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                |
//! |-----------|---------------------------------------------------------|
//! | [`ids`]   | `AgentId`, `NodeId`, `LinkId`, `ZoneId`, `AgentTypeId`, `DemandPeriodId` |
//! | [`time`]  | `Interval`, `SimulationConfig`                          |
//! | [`rng`]   | `SimRng` (seeded, deterministic)                        |
//! | [`error`] | `DtaError`, `DtaResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{DtaError, DtaResult};
pub use ids::{AgentId, AgentTypeId, DemandPeriodId, LinkId, NodeId, ZoneId};
pub use rng::SimRng;
pub use time::{Interval, SimulationConfig};
