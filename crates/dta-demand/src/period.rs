//! Demand period registry.

use dta_core::{DemandPeriodId, DtaError, DtaResult};

/// A named time-of-day period over which a distinct demand matrix applies
/// (e.g. "AM" covering 07:00–08:00).
#[derive(Clone, Debug)]
pub struct DemandPeriod {
    pub name:         String,
    /// Minutes past midnight.
    pub start_minute: u32,
    pub end_minute:   u32,
}

/// Registry resolving `DemandPeriodId`s to their descriptors.
///
/// Resolution of an unknown id is an error, not a silent default — callers
/// that calibrate against a period must fail fast before touching any state.
#[derive(Default)]
pub struct DemandPeriods {
    periods: Vec<DemandPeriod>,
}

impl DemandPeriods {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a period and return its id (sequential from 0).
    pub fn add(
        &mut self,
        name: impl Into<String>,
        start_minute: u32,
        end_minute: u32,
    ) -> DemandPeriodId {
        let id = DemandPeriodId(self.periods.len() as u16);
        self.periods.push(DemandPeriod {
            name: name.into(),
            start_minute,
            end_minute,
        });
        id
    }

    /// The descriptor for `id`.
    ///
    /// # Errors
    ///
    /// `DtaError::DemandPeriodNotFound` if `id` was never registered.
    pub fn resolve(&self, id: DemandPeriodId) -> DtaResult<&DemandPeriod> {
        self.periods
            .get(id.index())
            .ok_or(DtaError::DemandPeriodNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}
