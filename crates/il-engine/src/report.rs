//! What happened during one tick.

use il_core::{SectionId, Tick, TrainId, TrainIdx};

/// An accepted section change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainMove {
    pub train: TrainIdx,
    pub id:    TrainId,
    pub from:  SectionId,
    pub to:    SectionId,
}

/// A train leaving the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainExit {
    pub train:   TrainIdx,
    pub id:      TrainId,
    /// The exit section the train left from.
    pub at:      SectionId,
    /// `true` if the train reached `at` during this same tick; the matching
    /// [`TrainMove`] is also in the report.
    pub arrived: bool,
}

/// Why a requested train stayed where it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoldReason {
    /// The router found no path to the exit.
    NoRoute,
    /// The router proposed a section on the other line.
    OffLine,
    /// The router proposed a section with no track from here.
    NotAdjacent,
    /// Freight yielding at a crossing while a passenger train is in its zone.
    Yield { crossing: String },
    /// The destination is held by a train that is not leaving it this tick.
    Blocked { by: TrainId },
    /// Another train was awarded the same destination.
    LostContention { winner: TrainId },
}

impl HoldReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            HoldReason::NoRoute               => "no_route",
            HoldReason::OffLine               => "off_line",
            HoldReason::NotAdjacent           => "not_adjacent",
            HoldReason::Yield { .. }          => "yield",
            HoldReason::Blocked { .. }        => "blocked",
            HoldReason::LostContention { .. } => "lost_contention",
        }
    }
}

impl std::fmt::Display for HoldReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HoldReason::Yield { crossing }        => write!(f, "yield at {crossing}"),
            HoldReason::Blocked { by }            => write!(f, "blocked by {by}"),
            HoldReason::LostContention { winner } => write!(f, "lost to {winner}"),
            other                                 => f.write_str(other.as_str()),
        }
    }
}

/// A requested train that did not change state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Held {
    pub train:  TrainIdx,
    pub id:     TrainId,
    pub at:     SectionId,
    /// The section the train wanted, if the router proposed one.
    pub wanted: Option<SectionId>,
    pub reason: HoldReason,
}

/// Outcome of one `move_trains` call.
///
/// Every requested active train appears exactly once: in `moves`, in
/// `exits` (without a move), in both (arrived at its exit), or in `held`.
/// Entries keep request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick:  Tick,
    pub moves: Vec<TrainMove>,
    pub exits: Vec<TrainExit>,
    pub held:  Vec<Held>,
}

impl TickReport {
    pub(crate) fn new(tick: Tick) -> Self {
        Self { tick, ..Self::default() }
    }

    /// Number of trains that moved or exited.  A train that moves onto its
    /// exit and leaves counts once.
    pub fn changed(&self) -> usize {
        self.moves.len() + self.exits.iter().filter(|e| !e.arrived).count()
    }

    pub fn moved(&self, id: &str) -> Option<&TrainMove> {
        self.moves.iter().find(|m| m.id.as_str() == id)
    }

    pub fn exited(&self, id: &str) -> bool {
        self.exits.iter().any(|e| e.id.as_str() == id)
    }

    pub fn hold_of(&self, id: &str) -> Option<&HoldReason> {
        self.held.iter().find(|h| h.id.as_str() == id).map(|h| &h.reason)
    }
}
