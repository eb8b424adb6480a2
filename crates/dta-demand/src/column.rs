//! Path columns and the column pool.
//!
//! A *column* is one route between an origin-destination pair, carrying a
//! real-valued flow volume.  The pool groups columns under a composite key —
//! a structured value type rather than an ad-hoc tuple, so equality, hashing
//! and ordering are part of the contract.

use dta_core::{AgentTypeId, DemandPeriodId, LinkId, ZoneId};
use rustc_hash::FxHashMap;

// ── Column ────────────────────────────────────────────────────────────────────

/// One route (ordered link sequence) with its assigned flow volume.
#[derive(Clone, Debug)]
pub struct Column {
    /// Links in traversal order.
    pub links: Vec<LinkId>,

    /// Current flow volume.  Real-valued (fractional flow is meaningful);
    /// the calibration engine never drives it below 1.
    pub volume: f64,

    /// Exempts this column from calibration adjustment.
    pub fixed: bool,

    /// Gradient cost from the last calibration iteration.  Transient,
    /// recomputed each round; kept for route/assignment reporting.
    pub gradient_cost: f64,
}

impl Column {
    pub fn new(links: Vec<LinkId>, volume: f64) -> Self {
        Self { links, volume, fixed: false, gradient_cost: 0.0 }
    }

    /// A column exempt from calibration adjustment.
    pub fn fixed_route(links: Vec<LinkId>, volume: f64) -> Self {
        Self { links, volume, fixed: true, gradient_cost: 0.0 }
    }
}

// ── ColumnPoolKey ─────────────────────────────────────────────────────────────

/// Composite key grouping columns by agent type, demand period and OD pair.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ColumnPoolKey {
    pub agent_type: AgentTypeId,
    pub period:     DemandPeriodId,
    pub orig:       ZoneId,
    pub dest:       ZoneId,
}

// ── ColumnPool ────────────────────────────────────────────────────────────────

/// The full set of columns across all OD pairs, agent types and demand
/// periods.
///
/// Backed by an `FxHashMap` — keys are small `Copy` structs of integers, so
/// FxHash beats SipHash on every lookup with no DoS exposure (the pool is
/// built from trusted assignment output, not external input).
#[derive(Default)]
pub struct ColumnPool {
    inner: FxHashMap<ColumnPoolKey, Vec<Column>>,
}

impl ColumnPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `column` to the group under `key`.
    pub fn add_column(&mut self, key: ColumnPoolKey, column: Column) {
        self.inner.entry(key).or_default().push(column);
    }

    /// The columns grouped under `key`, if any.
    pub fn get(&self, key: &ColumnPoolKey) -> Option<&[Column]> {
        self.inner.get(key).map(Vec::as_slice)
    }

    /// Number of OD groups.
    pub fn group_count(&self) -> usize {
        self.inner.len()
    }

    /// Total number of columns across all groups.
    pub fn column_count(&self) -> usize {
        self.inner.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterator over all groups.
    pub fn entries(&self) -> impl Iterator<Item = (&ColumnPoolKey, &Vec<Column>)> {
        self.inner.iter()
    }

    /// Groups whose key matches `period`.
    ///
    /// The calibration engine supports a single demand period per call and
    /// works exclusively on this filtered view.
    pub fn period_entries(
        &self,
        period: DemandPeriodId,
    ) -> impl Iterator<Item = (&ColumnPoolKey, &Vec<Column>)> {
        self.inner.iter().filter(move |(k, _)| k.period == period)
    }

    /// Mutable variant of [`period_entries`](Self::period_entries).
    pub fn period_entries_mut(
        &mut self,
        period: DemandPeriodId,
    ) -> impl Iterator<Item = (&ColumnPoolKey, &mut Vec<Column>)> {
        self.inner.iter_mut().filter(move |(k, _)| k.period == period)
    }
}
