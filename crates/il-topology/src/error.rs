//! Topology error type.

use thiserror::Error;

use il_core::SectionId;

/// Errors produced by `il-topology`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("section {0} declared twice")]
    DuplicateSection(SectionId),

    #[error("section {0} is not part of the topology")]
    UnknownSection(SectionId),

    #[error("the INVALID sentinel cannot be used as a section")]
    InvalidSection,

    #[error("track from section {0} back to itself")]
    SelfLoop(SectionId),

    #[error("track {from} -> {to} joins two different lines")]
    CrossLineTrack { from: SectionId, to: SectionId },

    #[error("crossing {crossing}: guarded hop {from} -> {to} is not a freight track")]
    GuardedHopNotFreight {
        crossing: String,
        from:     SectionId,
        to:       SectionId,
    },

    #[error("no route from {from} to {to}")]
    NoRoute { from: SectionId, to: SectionId },
}

pub type TopologyResult<T> = Result<T, TopologyError>;
