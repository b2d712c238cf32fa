//! Registry error types.

use il_core::{Direction, Line, SectionId, TrainId, TrainIdx};
use thiserror::Error;

/// Why a train could not be admitted.  No state changes when any of these
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    #[error("train id must not be empty")]
    EmptyId,

    #[error("train {0} is already registered")]
    DuplicateId(TrainId),

    #[error("section {0} does not exist")]
    UnknownSection(SectionId),

    #[error("section {0} is not an entry in either direction")]
    NotAnEntry(SectionId),

    #[error("entry {section} is occupied by {by}")]
    Occupied { section: SectionId, by: TrainId },

    #[error("entry is on the {entry} line but exit is on the {exit} line")]
    LineMismatch { entry: Line, exit: Line },

    #[error("section {section} is not a {direction} exit")]
    NotAnExit { section: SectionId, direction: Direction },
}

/// Violations of the occupancy invariants.  These indicate a bug in the
/// caller that produced a commit, never bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("train {0} is not active")]
    NotActive(TrainIdx),

    #[error("train {0} appears more than once in one commit")]
    DuplicateTransition(TrainIdx),

    #[error("section {section} would hold more than one train")]
    CapacityViolation { section: SectionId },

    #[error("occupancy lists {train} at {section} but the train is elsewhere")]
    StaleOccupancy { section: SectionId, train: TrainIdx },

    #[error("active train {0} is missing from the occupancy table")]
    MissingOccupancy(TrainIdx),

    #[error("train {train} is at {section}, which is not on its line")]
    WrongLine { train: TrainIdx, section: SectionId },
}

pub type RegistryResult<T> = Result<T, RegistryError>;
