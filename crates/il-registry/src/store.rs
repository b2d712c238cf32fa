//! Structure-of-Arrays storage for train records.
//!
//! Every `Vec` field has exactly `count` elements and a `TrainIdx` is the
//! index into all of them:
//!
//! ```ignore
//! let here = store.section[train.index()];  // O(1)
//! ```
//!
//! Records are append-only.  An exited train keeps its slot forever so its
//! name stays reserved and queries keep answering with the exited sentinel.

use il_core::{Direction, Line, SectionId, Tick, TrainId, TrainIdx};

use crate::Map;

/// Lifecycle of a train.  `Exited` is terminal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TrainStatus {
    Active,
    Exited,
}

impl TrainStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TrainStatus::Active => "active",
            TrainStatus::Exited => "exited",
        }
    }
}

impl std::fmt::Display for TrainStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All trains ever admitted, in admission order.
#[derive(Debug, Default)]
pub struct TrainStore {
    /// Number of trains.  Equals the length of every SoA `Vec`.
    pub count: usize,

    pub ids:       Vec<TrainId>,
    /// Inferred from the entry section at admission.
    pub line:      Vec<Line>,
    /// Inferred from the entry set the entry section belongs to.
    pub direction: Vec<Direction>,
    /// Declared exit section.
    pub exit:      Vec<SectionId>,
    /// Current section; `SectionId::INVALID` once exited.
    pub section:   Vec<SectionId>,
    pub status:    Vec<TrainStatus>,
    /// Engine tick at which the train was admitted.
    pub admitted:  Vec<Tick>,
    /// Engine tick at which the train exited, if it has.
    pub exited:    Vec<Option<Tick>>,

    index: Map<TrainId, TrainIdx>,
}

impl TrainStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Slot of the train named `id`, whether active or exited.
    pub fn lookup(&self, id: &str) -> Option<TrainIdx> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[inline]
    pub fn is_active(&self, train: TrainIdx) -> bool {
        self.status
            .get(train.index())
            .is_some_and(|&s| s == TrainStatus::Active)
    }

    /// Iterator over all `TrainIdx`s in admission order.
    pub fn train_ids(&self) -> impl Iterator<Item = TrainIdx> + '_ {
        (0..self.count as u32).map(TrainIdx)
    }

    /// Iterator over the trains still on the network.
    pub fn active(&self) -> impl Iterator<Item = TrainIdx> + '_ {
        self.train_ids().filter(|&t| self.is_active(t))
    }

    /// Append a new active record.  The caller has already validated it.
    pub(crate) fn push(
        &mut self,
        id:        TrainId,
        line:      Line,
        direction: Direction,
        entry:     SectionId,
        exit:      SectionId,
        now:       Tick,
    ) -> TrainIdx {
        let idx = TrainIdx(self.count as u32);
        self.index.insert(id.clone(), idx);
        self.ids.push(id);
        self.line.push(line);
        self.direction.push(direction);
        self.exit.push(exit);
        self.section.push(entry);
        self.status.push(TrainStatus::Active);
        self.admitted.push(now);
        self.exited.push(None);
        self.count += 1;
        idx
    }

    pub(crate) fn retire(&mut self, train: TrainIdx, now: Tick) {
        let i = train.index();
        self.section[i] = SectionId::INVALID;
        self.status[i] = TrainStatus::Exited;
        self.exited[i] = Some(now);
    }
}
