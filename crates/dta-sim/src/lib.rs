//! `dta-sim` — point-queue network loading for the `rust_dta` framework.
//!
//! Loads assigned travel demand onto the road network one discrete interval
//! at a time: each link is a point-capacity queue (no physical spillback
//! along its length), agents traverse their pre-assigned paths, and node
//! throughput is shared between competing incoming links by a rotating
//! discharge order.
//!
//! # What lives here
//!
//! | Module       | Contents                                          |
//! |--------------|---------------------------------------------------|
//! | [`engine`]   | `NetworkLoader`, `LoadSummary`, the interval loop |
//! | [`builder`]  | `LoaderBuilder` with input validation             |
//! | [`queues`]   | `QueueStore`, per-link queues and capacity        |
//! | [`observer`] | `LoadObserver`, `NoopObserver`                    |
//! | [`error`]    | `SimError`, `SimResult`                           |

pub mod builder;
pub mod engine;
pub mod error;
pub mod observer;
pub mod queues;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::LoaderBuilder;
pub use engine::{LoadSummary, NetworkLoader};
pub use error::{SimError, SimResult};
pub use observer::{LoadObserver, NoopObserver};
pub use queues::{LinkQueues, QueueStore, WaitingStats};
