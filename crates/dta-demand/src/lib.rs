//! `dta-demand` — travel demand entities for the `rust_dta` framework.
//!
//! # What lives here
//!
//! | Module      | Contents                                             |
//! |-------------|------------------------------------------------------|
//! | [`agent`]   | `Agent` trajectory record                            |
//! | [`store`]   | `AgentStore`, id-indexed agent storage               |
//! | [`column`]  | `Column`, `ColumnPoolKey`, `ColumnPool`              |
//! | [`period`]  | `DemandPeriod` registry with failing resolution      |
//! | [`loading`] | `LoadingProfile` and departure assignment            |
//! | [`board`]   | `DepartureBoard`, interval → departing agents        |
//!
//! Everything here is produced by an external assignment engine (path
//! search and column generation are out of scope); this crate holds the
//! records the loading and calibration engines consume and mutate.

pub mod agent;
pub mod board;
pub mod column;
pub mod loading;
pub mod period;
pub mod store;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use agent::Agent;
pub use board::DepartureBoard;
pub use column::{Column, ColumnPool, ColumnPoolKey};
pub use loading::{LoadingProfile, assign_departures};
pub use period::{DemandPeriod, DemandPeriods};
pub use store::AgentStore;
