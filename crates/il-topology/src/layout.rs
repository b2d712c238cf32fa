//! Plain-data description of a track plan.
//!
//! A [`Layout`] is what a caller hands over at construction time.  With the
//! `serde` feature it can be deserialized from whatever format the caller
//! prefers; this crate does not read files itself.

use il_core::{Direction, Line, SectionId};

use crate::{Crossing, Topology, TopologyBuilder, TopologyResult};

/// Sections, directed tracks, entry/exit sets, and crossings of a track plan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    pub sections:  Vec<(SectionId, Line)>,
    /// Directed tracks, in adjacency (tie-break) order per source.
    pub tracks:    Vec<(SectionId, SectionId)>,
    pub entries:   Vec<(Direction, SectionId)>,
    pub exits:     Vec<(Direction, SectionId)>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crossings: Vec<Crossing>,
}

impl Layout {
    /// Validate and build the [`Topology`] this layout describes.
    pub fn build(&self) -> TopologyResult<Topology> {
        self.to_builder().build()
    }

    pub fn to_builder(&self) -> TopologyBuilder {
        let mut b = TopologyBuilder::new();
        for &(s, line) in &self.sections {
            b.add_section(s, line);
        }
        for &(from, to) in &self.tracks {
            b.add_track(from, to);
        }
        for &(d, s) in &self.entries {
            b.add_entry(d, s);
        }
        for &(d, s) in &self.exits {
            b.add_exit(d, s);
        }
        for c in &self.crossings {
            b.add_crossing(c.name.clone(), c.zone.iter().copied(), c.guarded.iter().copied());
        }
        b
    }

    /// The reference junction: a passenger network (1, 2, 4, 5, 6, 8, 9, 10)
    /// and a freight line (3, 7, 11) meeting at one diamond.
    ///
    /// ```text
    ///   passenger                          freight
    ///
    ///        1                                3
    ///        ↓                                ↕
    ///   4 ⇄  5  → 2                           7 ──╳── CROSS
    ///        ⇅                                ↕
    ///   8 ⇄  6  ⇄ 9                          11
    ///        ↑
    ///       10
    /// ```
    ///
    /// | direction  | entries        | exits        |
    /// |------------|----------------|--------------|
    /// | southbound | 1, 3           | 4, 8, 9, 11  |
    /// | northbound | 4, 9, 10, 11   | 2, 3         |
    ///
    /// Passenger presence at 5, 6 or 9 holds freight on the 7 ↔ 11 hops.
    pub fn junction() -> Layout {
        let s = SectionId;
        let passenger = [1, 2, 4, 5, 6, 8, 9, 10];
        let freight = [3, 7, 11];

        let sections = passenger
            .iter()
            .map(|&n| (s(n), Line::Passenger))
            .chain(freight.iter().map(|&n| (s(n), Line::Freight)))
            .collect();

        let tracks = [
            // passenger
            (1, 5), (5, 6), (5, 4), (5, 2), (6, 9), (6, 8), (6, 5),
            (9, 6), (10, 6), (4, 5), (8, 6),
            // freight
            (3, 7), (7, 11), (11, 7), (7, 3),
        ]
        .into_iter()
        .map(|(a, b)| (s(a), s(b)))
        .collect();

        let entries = [1, 3]
            .map(|n| (Direction::Southbound, s(n)))
            .into_iter()
            .chain([4, 9, 10, 11].map(|n| (Direction::Northbound, s(n))))
            .collect();

        let exits = [4, 8, 9, 11]
            .map(|n| (Direction::Southbound, s(n)))
            .into_iter()
            .chain([2, 3].map(|n| (Direction::Northbound, s(n))))
            .collect();

        let crossings = vec![Crossing {
            name:    "CROSS".to_owned(),
            zone:    vec![s(5), s(6), s(9)],
            guarded: vec![(s(7), s(11)), (s(11), s(7))],
        }];

        Layout { sections, tracks, entries, exits, crossings }
    }
}
