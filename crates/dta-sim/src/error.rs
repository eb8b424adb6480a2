use dta_core::{AgentId, DemandPeriodId, DtaError, LinkId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] DtaError),

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("agent {agent} references dangling link {link}")]
    DanglingLink {
        agent: AgentId,
        link:  LinkId,
    },

    #[error("link {link} has no free-flow travel time for period {period}")]
    MissingPeriodFftt {
        link:   LinkId,
        period: DemandPeriodId,
    },
}

pub type SimResult<T> = Result<T, SimError>;
