use il_registry::{AdmissionError, RegistryError};
use il_topology::TopologyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("interlocking configuration error: {0}")]
    Config(String),

    #[error("topology error: {0}")]
    Topology(#[from] TopologyError),

    #[error("admission rejected: {0}")]
    Admission(#[from] AdmissionError),

    /// The resolver produced a batch the registry refused.  Nothing was
    /// applied; this indicates a resolver bug rather than bad input.
    #[error("commit rejected: {0}")]
    Commit(#[from] RegistryError),
}

pub type EngineResult<T> = Result<T, EngineError>;
