//! Framework error type.
//!
//! Engine crates define their own error enums and either convert into
//! `DtaError` via `From` impls or wrap it as one variant.  Both patterns are
//! acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::{AgentId, DemandPeriodId, LinkId, ZoneId};

/// The top-level error type for `dta-core` and a common base for the engine
/// crates.
#[derive(Debug, Error)]
pub enum DtaError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("link {0} not found")]
    LinkNotFound(LinkId),

    #[error("zone {0} not found")]
    ZoneNotFound(ZoneId),

    #[error("demand period {0} not found")]
    DemandPeriodNotFound(DemandPeriodId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `dta-*` crates.
pub type DtaResult<T> = Result<T, DtaError>;
