//! Track topology representation and builder.
//!
//! # Data layout
//!
//! Sections are stored densely by **slot** (insertion order); a small map
//! translates a `SectionId` to its slot.  Outgoing tracks use **Compressed
//! Sparse Row (CSR)** format:
//!
//! ```text
//! track_to[ out_start[slot] .. out_start[slot + 1] ]
//! ```
//!
//! Tracks of one source keep the order in which they were added.  That order
//! is the routing tie-break order, so it is part of the topology's meaning,
//! not an implementation detail.

use il_core::{Direction, Line, SectionId};

use crate::{Map, TopologyError, TopologyResult};

// ── Crossing ──────────────────────────────────────────────────────────────────

/// A shared diamond between the two lines.
///
/// While any passenger train occupies a section of `zone`, freight trains
/// may not take any of the `guarded` hops.  The rule is not symmetric:
/// passenger trains never yield to freight.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crossing {
    pub name:    String,
    pub zone:    Vec<SectionId>,
    pub guarded: Vec<(SectionId, SectionId)>,
}

impl Crossing {
    /// `true` if the directed hop `from -> to` is guarded by this crossing.
    pub fn guards(&self, from: SectionId, to: SectionId) -> bool {
        self.guarded.iter().any(|&(a, b)| a == from && b == to)
    }
}

// ── Topology ──────────────────────────────────────────────────────────────────

/// Immutable track plan: sections, per-line adjacency, entry/exit sets, and
/// crossings.  Construct with [`TopologyBuilder`] or [`Layout::build`].
///
/// [`Layout::build`]: crate::Layout::build
#[derive(Debug, Clone)]
pub struct Topology {
    /// Section id of each slot, in declaration order.
    sections: Vec<SectionId>,
    slot_of:  Map<SectionId, u32>,
    /// Line of each slot.
    lines:    Vec<Line>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// Length = `section_count + 1`.
    out_start: Vec<u32>,
    track_to:  Vec<SectionId>,

    // ── Classification, indexed by `Direction::index()` then slot ────────
    entry: [Vec<bool>; 2],
    exit:  [Vec<bool>; 2],

    crossings: Vec<Crossing>,
    in_zone:   Vec<bool>,
}

impl Topology {
    /// A topology with no sections.  Every query answers "nothing".
    pub fn empty() -> Self {
        Self {
            sections:  Vec::new(),
            slot_of:   Map::default(),
            lines:     Vec::new(),
            out_start: vec![0],
            track_to:  Vec::new(),
            entry:     [Vec::new(), Vec::new()],
            exit:      [Vec::new(), Vec::new()],
            crossings: Vec::new(),
            in_zone:   Vec::new(),
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn track_count(&self) -> usize {
        self.track_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// All sections in declaration order.
    pub fn sections(&self) -> &[SectionId] {
        &self.sections
    }

    pub fn contains(&self, section: SectionId) -> bool {
        self.slot_of.contains_key(&section)
    }

    #[inline]
    fn slot(&self, section: SectionId) -> Option<usize> {
        self.slot_of.get(&section).map(|&s| s as usize)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Line of `section`, or `None` for an unknown section.
    pub fn line(&self, section: SectionId) -> Option<Line> {
        self.slot(section).map(|s| self.lines[s])
    }

    /// Next-hop neighbours of `section` on `line`, in adjacency order.
    ///
    /// Empty when the section is unknown or belongs to the other line.
    pub fn neighbors(&self, section: SectionId, line: Line) -> &[SectionId] {
        match self.slot(section) {
            Some(s) if self.lines[s] == line => {
                let start = self.out_start[s] as usize;
                let end   = self.out_start[s + 1] as usize;
                &self.track_to[start..end]
            }
            _ => &[],
        }
    }

    /// `true` if a directed track `from -> to` exists on `line`.
    pub fn is_adjacent(&self, from: SectionId, to: SectionId, line: Line) -> bool {
        self.neighbors(from, line).contains(&to)
    }

    pub fn is_entry(&self, direction: Direction, section: SectionId) -> bool {
        self.slot(section)
            .is_some_and(|s| self.entry[direction.index()][s])
    }

    pub fn is_exit(&self, direction: Direction, section: SectionId) -> bool {
        self.slot(section)
            .is_some_and(|s| self.exit[direction.index()][s])
    }

    /// Directions in which `section` is an entry, in [`Direction::ALL`]
    /// order.  Empty when the section is not an entry at all.
    pub fn entry_directions(&self, section: SectionId) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |&d| self.is_entry(d, section))
    }

    /// `true` if `section` lies in the zone of any crossing.
    pub fn in_crossing_zone(&self, section: SectionId) -> bool {
        self.slot(section).is_some_and(|s| self.in_zone[s])
    }

    pub fn crossings(&self) -> &[Crossing] {
        &self.crossings
    }

    /// Crossings that guard the directed hop `from -> to`.
    pub fn crossings_guarding(
        &self,
        from: SectionId,
        to:   SectionId,
    ) -> impl Iterator<Item = &Crossing> + '_ {
        self.crossings.iter().filter(move |c| c.guards(from, to))
    }
}

// ── TopologyBuilder ───────────────────────────────────────────────────────────

/// Construct a [`Topology`] incrementally, then call [`build`](Self::build).
///
/// Declarations may come in any order; all cross-references are validated by
/// `build()`.
///
/// # Example
///
/// ```
/// use il_core::{Direction, Line, SectionId};
/// use il_topology::TopologyBuilder;
///
/// let mut b = TopologyBuilder::new();
/// b.add_section(SectionId(1), Line::Passenger)
///     .add_section(SectionId(2), Line::Passenger)
///     .add_track(SectionId(1), SectionId(2))
///     .add_entry(Direction::Southbound, SectionId(1))
///     .add_exit(Direction::Southbound, SectionId(2));
/// let topo = b.build().unwrap();
/// assert_eq!(topo.neighbors(SectionId(1), Line::Passenger), &[SectionId(2)]);
/// ```
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    sections:  Vec<(SectionId, Line)>,
    tracks:    Vec<(SectionId, SectionId)>,
    entries:   Vec<(Direction, SectionId)>,
    exits:     Vec<(Direction, SectionId)>,
    crossings: Vec<Crossing>,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_section(&mut self, section: SectionId, line: Line) -> &mut Self {
        self.sections.push((section, line));
        self
    }

    /// Add a **directed** track from `from` to `to`.
    pub fn add_track(&mut self, from: SectionId, to: SectionId) -> &mut Self {
        self.tracks.push((from, to));
        self
    }

    /// Convenience: add tracks in **both directions** between `a` and `b`.
    pub fn add_link(&mut self, a: SectionId, b: SectionId) -> &mut Self {
        self.add_track(a, b);
        self.add_track(b, a)
    }

    pub fn add_entry(&mut self, direction: Direction, section: SectionId) -> &mut Self {
        self.entries.push((direction, section));
        self
    }

    pub fn add_exit(&mut self, direction: Direction, section: SectionId) -> &mut Self {
        self.exits.push((direction, section));
        self
    }

    pub fn add_crossing(
        &mut self,
        name:    impl Into<String>,
        zone:    impl IntoIterator<Item = SectionId>,
        guarded: impl IntoIterator<Item = (SectionId, SectionId)>,
    ) -> &mut Self {
        self.crossings.push(Crossing {
            name:    name.into(),
            zone:    zone.into_iter().collect(),
            guarded: guarded.into_iter().collect(),
        });
        self
    }

    pub fn section_count(&self) -> usize { self.sections.len() }
    pub fn track_count(&self) -> usize { self.tracks.len() }

    /// Validate the declarations and produce a [`Topology`].
    ///
    /// Repeated identical tracks collapse to the first occurrence.
    pub fn build(&self) -> TopologyResult<Topology> {
        // ── Sections ──────────────────────────────────────────────────────
        let mut slot_of = Map::with_capacity_and_hasher(self.sections.len(), Default::default());
        let mut sections = Vec::with_capacity(self.sections.len());
        let mut lines = Vec::with_capacity(self.sections.len());
        for &(id, line) in &self.sections {
            if id == SectionId::INVALID {
                return Err(TopologyError::InvalidSection);
            }
            if slot_of.insert(id, sections.len() as u32).is_some() {
                return Err(TopologyError::DuplicateSection(id));
            }
            sections.push(id);
            lines.push(line);
        }
        let n = sections.len();
        let slot = |id: SectionId| {
            slot_of
                .get(&id)
                .map(|&s| s as usize)
                .ok_or(TopologyError::UnknownSection(id))
        };

        // ── Tracks → CSR ──────────────────────────────────────────────────
        let mut raw: Vec<(usize, SectionId)> = Vec::with_capacity(self.tracks.len());
        for (i, &(from, to)) in self.tracks.iter().enumerate() {
            let fs = slot(from)?;
            let ts = slot(to)?;
            if from == to {
                return Err(TopologyError::SelfLoop(from));
            }
            if lines[fs] != lines[ts] {
                return Err(TopologyError::CrossLineTrack { from, to });
            }
            if self.tracks[..i].contains(&(from, to)) {
                continue;
            }
            raw.push((fs, to));
        }
        // Stable sort: tracks of one source keep their declaration order.
        raw.sort_by_key(|&(fs, _)| fs);

        let mut out_start = vec![0u32; n + 1];
        for &(fs, _) in &raw {
            out_start[fs + 1] += 1;
        }
        for i in 1..=n {
            out_start[i] += out_start[i - 1];
        }
        debug_assert_eq!(out_start[n] as usize, raw.len());
        let track_to: Vec<SectionId> = raw.into_iter().map(|(_, to)| to).collect();

        // ── Entry / exit classification ───────────────────────────────────
        let mut entry = [vec![false; n], vec![false; n]];
        for &(d, s) in &self.entries {
            entry[d.index()][slot(s)?] = true;
        }
        let mut exit = [vec![false; n], vec![false; n]];
        for &(d, s) in &self.exits {
            exit[d.index()][slot(s)?] = true;
        }

        // ── Crossings ─────────────────────────────────────────────────────
        let mut in_zone = vec![false; n];
        for c in &self.crossings {
            for &s in &c.zone {
                in_zone[slot(s)?] = true;
            }
            for &(from, to) in &c.guarded {
                let fs = slot(from)?;
                slot(to)?;
                let is_freight_track = lines[fs] == Line::Freight
                    && self.tracks.contains(&(from, to));
                if !is_freight_track {
                    return Err(TopologyError::GuardedHopNotFreight {
                        crossing: c.name.clone(),
                        from,
                        to,
                    });
                }
            }
        }

        Ok(Topology {
            sections,
            slot_of,
            lines,
            out_start,
            track_to,
            entry,
            exit,
            crossings: self.crossings.clone(),
            in_zone,
        })
    }
}
