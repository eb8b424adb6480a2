use dta_core::{DtaError, LinkId, ZoneId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OdmeError {
    #[error(transparent)]
    Core(#[from] DtaError),

    #[error("column references dangling link {0}")]
    DanglingLink(LinkId),

    #[error("column pool references unknown zone {0}")]
    UnknownZone(ZoneId),
}

pub type OdmeResult<T> = Result<T, OdmeError>;
