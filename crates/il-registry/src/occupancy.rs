//! Section → train occupancy table.

use il_core::{SectionId, TrainIdx};

use crate::Map;

/// Which train holds each occupied section.  Unoccupied sections have no
/// entry.  Capacity is one train per section by construction: the map
/// cannot hold two values for one key.
#[derive(Debug, Default, Clone)]
pub struct Occupancy {
    by_section: Map<SectionId, TrainIdx>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn occupant(&self, section: SectionId) -> Option<TrainIdx> {
        self.by_section.get(&section).copied()
    }

    #[inline]
    pub fn is_free(&self, section: SectionId) -> bool {
        !self.by_section.contains_key(&section)
    }

    pub fn len(&self) -> usize {
        self.by_section.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_section.is_empty()
    }

    /// Occupied sections in ascending section order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionId, TrainIdx)> + '_ {
        let mut v: Vec<_> = self.by_section.iter().map(|(&s, &t)| (s, t)).collect();
        v.sort_unstable_by_key(|&(s, _)| s);
        v.into_iter()
    }

    /// Put `train` at `section`, returning the previous occupant if any.
    pub(crate) fn place(&mut self, section: SectionId, train: TrainIdx) -> Option<TrainIdx> {
        self.by_section.insert(section, train)
    }

    pub(crate) fn vacate(&mut self, section: SectionId) -> Option<TrainIdx> {
        self.by_section.remove(&section)
    }
}
