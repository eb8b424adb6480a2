//! `dta-odme` — origin-destination demand estimation for the `rust_dta`
//! framework.
//!
//! Calibrates path (column) volumes against field observations — link
//! counts, zone productions and attractions — with a bounded gradient
//! projection: each iteration accumulates estimated flows, measures
//! deviations, and moves every adjustable column's volume against its
//! gradient cost by at most 5% per round, never below a volume of 1.
//!
//! # What lives here
//!
//! | Module       | Contents                                          |
//! |--------------|---------------------------------------------------|
//! | [`engine`]   | `Calibrator`, `OdmeSettings`, the iteration loop  |
//! | [`gaps`]     | `IterationGaps` diagnostics                       |
//! | [`observer`] | `CalibrationObserver`, `NoopObserver`             |
//! | [`error`]    | `OdmeError`, `OdmeResult`                         |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Rayon fan-out of the accumulate pass over pool entries. |

pub mod engine;
pub mod error;
pub mod gaps;
pub mod observer;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use engine::{Calibrator, OdmeSettings};
pub use error::{OdmeError, OdmeResult};
pub use gaps::IterationGaps;
pub use observer::{CalibrationObserver, NoopObserver};
