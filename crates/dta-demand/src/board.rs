//! `DepartureBoard` — sparse per-interval departure queue.
//!
//! # Why this exists
//!
//! Most intervals see no departures.  Scanning all N agents every interval to
//! ask "does anyone depart now?" would cost O(N) per interval regardless of
//! how many actually do.  The board inverts the problem: departures are
//! registered once, keyed by interval, and each interval drains only its own
//! entry — O(departing) work instead of O(N).
//!
//! `BTreeMap` keeps inserts and drains at O(log W) where W is the number of
//! distinct departure intervals currently registered; for a one-hour loading
//! window at 6 s resolution W ≤ 600, so the constant is tiny.

use std::collections::BTreeMap;

use dta_core::{AgentId, Interval};

use crate::AgentStore;

/// Maps departure intervals to the agents departing at them.
#[derive(Default)]
pub struct DepartureBoard {
    inner: BTreeMap<Interval, Vec<AgentId>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl DepartureBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the board from each agent's assigned departure interval.
    ///
    /// Agents without a path are not registered — they have no first link to
    /// enter and never depart.
    pub fn build_from_store(store: &AgentStore) -> Self {
        let mut board = Self::new();
        for (i, agent) in store.iter().enumerate() {
            if agent.has_path() {
                board.push(agent.scheduled_dep, AgentId(i as u32));
            }
        }
        board
    }

    /// Register `agent` to depart at `interval`.
    pub fn push(&mut self, interval: Interval, agent: AgentId) {
        self.inner.entry(interval).or_default().push(agent);
        self.total += 1;
    }

    /// `true` if at least one agent departs at exactly `interval`.
    pub fn has_departures(&self, interval: Interval) -> bool {
        self.inner.contains_key(&interval)
    }

    /// Remove and return all agents departing at exactly `interval`.
    ///
    /// Returns `None` if no agent departs then (the common case — avoids
    /// allocation).
    pub fn drain_interval(&mut self, interval: Interval) -> Option<Vec<AgentId>> {
        let agents = self.inner.remove(&interval)?;
        self.total -= agents.len();
        Some(agents)
    }

    /// The earliest interval with a registered departure, or `None` if empty.
    pub fn next_interval(&self) -> Option<Interval> {
        self.inner.keys().next().copied()
    }

    /// Total registered departures across all future intervals.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
