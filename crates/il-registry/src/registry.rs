//! The `Registry`: train records plus the occupancy table, kept in step.
//!
//! Only two operations mutate a registry:
//!
//! - [`Registry::admit`]: validates and places one new train.
//! - [`Registry::commit`]: applies one tick's worth of exits and moves
//!   atomically.  The whole batch is checked before anything is written, so
//!   a rejected commit leaves the registry untouched.

use std::collections::HashSet;

use il_core::{SectionId, Tick, TrainId, TrainIdx};
use il_topology::Topology;

use crate::{AdmissionError, Occupancy, RegistryError, RegistryResult, TrainStore};

#[derive(Debug, Default)]
pub struct Registry {
    pub trains:    TrainStore,
    pub occupancy: Occupancy,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Admission ─────────────────────────────────────────────────────────

    /// Admit train `id` at `entry`, heading for `exit`.
    ///
    /// The line comes from the entry section.  The direction is the first
    /// one, in `Direction::ALL` order, for which `entry` is an entry and
    /// `exit` is an exit; the exit must also be on the same line.
    pub fn admit(
        &mut self,
        topology: &Topology,
        id:       &str,
        entry:    SectionId,
        exit:     SectionId,
        now:      Tick,
    ) -> Result<TrainIdx, AdmissionError> {
        if id.is_empty() {
            return Err(AdmissionError::EmptyId);
        }
        if self.trains.contains(id) {
            return Err(AdmissionError::DuplicateId(TrainId::from(id)));
        }
        let line = topology
            .line(entry)
            .ok_or(AdmissionError::UnknownSection(entry))?;
        let Some(first) = topology.entry_directions(entry).next() else {
            return Err(AdmissionError::NotAnEntry(entry));
        };
        if let Some(by) = self.occupancy.occupant(entry) {
            return Err(AdmissionError::Occupied {
                section: entry,
                by:      self.trains.ids[by.index()].clone(),
            });
        }
        let exit_line = topology
            .line(exit)
            .ok_or(AdmissionError::UnknownSection(exit))?;
        if exit_line != line {
            return Err(AdmissionError::LineMismatch { entry: line, exit: exit_line });
        }
        let direction = topology
            .entry_directions(entry)
            .find(|&d| topology.is_exit(d, exit))
            .ok_or(AdmissionError::NotAnExit { section: exit, direction: first })?;

        let idx = self.trains.push(TrainId::from(id), line, direction, entry, exit, now);
        self.occupancy.place(entry, idx);
        Ok(idx)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Current section of the train named `id`; `None` if unknown or exited.
    pub fn section_of(&self, id: &str) -> Option<SectionId> {
        self.trains
            .lookup(id)
            .filter(|&t| self.trains.is_active(t))
            .map(|t| self.trains.section[t.index()])
    }

    /// Name of the train occupying `section`.
    pub fn occupant_id(&self, section: SectionId) -> Option<&TrainId> {
        self.occupancy
            .occupant(section)
            .map(|t| &self.trains.ids[t.index()])
    }

    // ── Atomic commit ─────────────────────────────────────────────────────

    /// Apply one tick: every train in `exits` leaves the network and every
    /// `(train, to)` in `moves` advances to `to`.
    ///
    /// All sources are vacated before any destination is filled, so swaps
    /// and follower chains commit cleanly.  Fails without side effects if
    /// the batch would put two trains in one section.
    pub fn commit(
        &mut self,
        exits: &[TrainIdx],
        moves: &[(TrainIdx, SectionId)],
        now:   Tick,
    ) -> RegistryResult<()> {
        // ── Validate ──────────────────────────────────────────────────────
        let mut departing: HashSet<TrainIdx> = HashSet::with_capacity(exits.len() + moves.len());
        for &t in exits.iter().chain(moves.iter().map(|(t, _)| t)) {
            if !self.trains.is_active(t) {
                return Err(RegistryError::NotActive(t));
            }
            if !departing.insert(t) {
                return Err(RegistryError::DuplicateTransition(t));
            }
        }
        let mut claimed: HashSet<SectionId> = HashSet::with_capacity(moves.len());
        for &(_, to) in moves {
            let held_by_stayer = self
                .occupancy
                .occupant(to)
                .is_some_and(|o| !departing.contains(&o));
            if held_by_stayer || !claimed.insert(to) {
                return Err(RegistryError::CapacityViolation { section: to });
            }
        }

        // ── Apply ─────────────────────────────────────────────────────────
        for &t in &departing {
            self.occupancy.vacate(self.trains.section[t.index()]);
        }
        for &t in exits {
            self.trains.retire(t, now);
        }
        for &(t, to) in moves {
            self.trains.section[t.index()] = to;
            self.occupancy.place(to, t);
        }
        Ok(())
    }

    // ── Invariants ────────────────────────────────────────────────────────

    /// Check that the occupancy table is exactly the set of active trains
    /// keyed by their current section, and that every active train sits on
    /// its own line.
    pub fn check_consistency(&self, topology: &Topology) -> RegistryResult<()> {
        for (section, train) in self.occupancy.iter() {
            if !self.trains.is_active(train)
                || self.trains.section[train.index()] != section
            {
                return Err(RegistryError::StaleOccupancy { section, train });
            }
        }
        for train in self.trains.active() {
            let section = self.trains.section[train.index()];
            if self.occupancy.occupant(section) != Some(train) {
                return Err(RegistryError::MissingOccupancy(train));
            }
            if topology.line(section) != Some(self.trains.line[train.index()]) {
                return Err(RegistryError::WrongLine { train, section });
            }
        }
        Ok(())
    }
}
