//! Plain data row types written by output backends.

/// What happened to a train in one event row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Move,
    Exit,
    Hold,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Move => "move",
            EventKind::Exit => "exit",
            EventKind::Hold => "hold",
        }
    }
}

/// One train's outcome in one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainEventRow {
    pub tick:   u64,
    pub train:  String,
    pub kind:   EventKind,
    /// Section the train was on at tick start.
    pub from:   i64,
    /// Section after a move, or the wanted section of a hold; `-1` for
    /// exits and for holds without a proposal.
    pub to:     i64,
    /// Hold reason; empty otherwise.
    pub detail: String,
}

/// Counts for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:      u64,
    /// Distinct active trains named in the request.
    pub requested: u64,
    pub moved:     u64,
    pub exited:    u64,
    pub held:      u64,
    /// The `move_trains` return value.
    pub changed:   u64,
}
