//! Loading observer trait for progress reporting and data collection.

use dta_core::Interval;
use dta_demand::AgentStore;

use crate::{LoadSummary, QueueStore};

/// Callbacks invoked by [`NetworkLoader::run`][crate::NetworkLoader::run] at
/// key points in the interval loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl LoadObserver for ProgressPrinter {
///     fn on_minute(&mut self, minute: u32, summary: &LoadSummary) {
///         println!(
///             "simu time = {minute} min, CA = {}, CD = {}",
///             summary.cum_arrivals, summary.cum_departures,
///         );
///     }
/// }
/// ```
pub trait LoadObserver {
    /// Called once per simulated minute with the running cumulative
    /// arrival/departure counters.  Purely observational.
    fn on_minute(&mut self, _minute: u32, _summary: &LoadSummary) {}

    /// Called at the end of every interval with read-only access to the full
    /// queue and agent state, so tests and output writers can record
    /// occupancy without the engine knowing about any specific format.
    fn on_interval_end(
        &mut self,
        _now:     Interval,
        _queues:  &QueueStore,
        _agents:  &AgentStore,
        _summary: &LoadSummary,
    ) {
    }

    /// Called once after the final interval completes.
    fn on_run_end(&mut self, _summary: &LoadSummary) {}
}

/// A [`LoadObserver`] that does nothing.  Use when you need to call `run`
/// but don't want progress callbacks.
pub struct NoopObserver;

impl LoadObserver for NoopObserver {}
