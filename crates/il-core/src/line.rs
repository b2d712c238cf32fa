//! Line and direction enums shared by every crate that reasons about track.
//!
//! The two lines are disjoint networks: a section belongs to exactly one of
//! them and a train only ever occupies sections of its own line.

/// The network a section (and every train on it) belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Line {
    Passenger,
    Freight,
}

impl Line {
    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            Line::Passenger => "passenger",
            Line::Freight   => "freight",
        }
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of travel.  Entry and exit classification is per direction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Southbound,
    Northbound,
}

impl Direction {
    /// Both directions in classification order.  When a section is an entry
    /// for both, the first match wins.
    pub const ALL: [Direction; 2] = [Direction::Southbound, Direction::Northbound];

    /// Position in [`Direction::ALL`], for per-direction arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Direction::Southbound => 0,
            Direction::Northbound => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Southbound => "southbound",
            Direction::Northbound => "northbound",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
