//! The `Interlocking` facade: admission, ticks, and queries.

use il_core::{EXITED, SectionId, Tick, TrainId, TrainIdx};
use il_registry::{AdmissionError, Registry, TrainStatus};
use il_topology::{BfsRouter, Router, Topology};
use tracing::{debug, error, info, trace};

use crate::resolve::{Outcome, resolve};
use crate::{
    EngineResult, Held, NoopObserver, Set, TickObserver, TickReport, TrainExit, TrainMove,
};

/// A rail interlocking over one fixed [`Topology`].
///
/// The four operations every caller needs are [`add_train`],
/// [`move_trains`], [`get_section`] and [`get_train`].  They take plain
/// section numbers and report failure through sentinels (`false`, `0`,
/// `None`, [`EXITED`]).  Typed counterparts ([`try_add_train`], [`step`],
/// [`occupant`], [`train_section`]) expose the reasons.
///
/// Each `move_trains` / `step` call is one tick.  The tick counter advances
/// even when nothing moves.
///
/// Create via [`Interlocking::new`] or
/// [`InterlockingBuilder`][crate::InterlockingBuilder].
///
/// [`add_train`]: Self::add_train
/// [`move_trains`]: Self::move_trains
/// [`get_section`]: Self::get_section
/// [`get_train`]: Self::get_train
/// [`try_add_train`]: Self::try_add_train
/// [`step`]: Self::step
/// [`occupant`]: Self::occupant
/// [`train_section`]: Self::train_section
#[derive(Debug)]
pub struct Interlocking<R: Router = BfsRouter> {
    topology: Topology,
    router:   R,
    registry: Registry,
    /// Tick the next `move_trains` call will run as.
    tick:     Tick,
}

impl Interlocking<BfsRouter> {
    /// Interlocking over `topology` with breadth-first routing.
    pub fn new(topology: Topology) -> Self {
        Self::with_router(topology, BfsRouter)
    }
}

impl<R: Router> Interlocking<R> {
    pub fn with_router(topology: Topology, router: R) -> Self {
        Self {
            topology,
            router,
            registry: Registry::new(),
            tick:     Tick::ZERO,
        }
    }

    // ── Admission ─────────────────────────────────────────────────────────

    /// Admit train `id` at section `entry`, bound for section `exit`.
    ///
    /// Returns `false` (and changes nothing) for an empty or reused id, an
    /// unknown, non-entry or occupied entry, or an exit that is not valid
    /// for the entry's line and direction.
    pub fn add_train(&mut self, id: &str, entry: i64, exit: i64) -> bool {
        let (Ok(entry), Ok(exit)) = (SectionId::from_number(entry), SectionId::from_number(exit))
        else {
            debug!(train = id, entry, exit, "admission rejected: section out of range");
            return false;
        };
        self.try_add_train(id, entry, exit).is_ok()
    }

    /// Typed form of [`add_train`](Self::add_train).
    pub fn try_add_train(
        &mut self,
        id:    &str,
        entry: SectionId,
        exit:  SectionId,
    ) -> Result<TrainIdx, AdmissionError> {
        match self.registry.admit(&self.topology, id, entry, exit, self.tick) {
            Ok(train) => {
                let i = train.index();
                info!(
                    train = id,
                    %entry,
                    %exit,
                    line = %self.registry.trains.line[i],
                    direction = %self.registry.trains.direction[i],
                    tick = self.tick.0,
                    "train admitted"
                );
                Ok(train)
            }
            Err(e) => {
                debug!(train = id, %entry, %exit, error = %e, "admission rejected");
                Err(e)
            }
        }
    }

    // ── Ticks ─────────────────────────────────────────────────────────────

    /// Run one tick for the named trains and return how many moved or
    /// exited.
    ///
    /// Unknown and exited ids are ignored, as are repeats of an id already
    /// in the batch.  An empty batch is a tick in which nothing happens.
    pub fn move_trains<I, S>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.step(ids, &mut NoopObserver) {
            Ok(report) => report.changed(),
            Err(e) => {
                error!(error = %e, "tick discarded");
                0
            }
        }
    }

    /// Run one tick, reporting every decision to `observer`.
    ///
    /// On error nothing was applied, though the tick counter still advances.
    pub fn step<I, S, O>(&mut self, ids: I, observer: &mut O) -> EngineResult<TickReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        O: TickObserver,
    {
        let now = self.tick;
        self.tick = now.next();
        let span = tracing::debug_span!("tick", tick = now.0);
        let _enter = span.enter();

        let requested = self.requested(ids);
        observer.on_tick_start(now, requested.len());

        let plan = resolve(&self.topology, &self.router, &self.registry, &requested);
        let (exits, moves) = plan.commit_batches();

        // Capture sources before the commit overwrites them.
        let from: Vec<SectionId> = plan
            .outcomes
            .iter()
            .map(|(t, _)| self.registry.trains.section[t.index()])
            .collect();
        self.registry.commit(&exits, &moves, now)?;

        let mut report = TickReport::new(now);
        for ((train, outcome), from) in plan.outcomes.into_iter().zip(from) {
            let id = self.registry.trains.ids[train.index()].clone();
            match outcome {
                Outcome::Exit => {
                    debug!(train = %id, at = %from, "exit");
                    report.exits.push(TrainExit { train, id, at: from, arrived: false });
                }
                Outcome::Move { to, exits } => {
                    debug!(train = %id, %from, %to, exits, "move");
                    if exits {
                        report.exits.push(TrainExit { train, id: id.clone(), at: to, arrived: true });
                    }
                    report.moves.push(TrainMove { train, id, from, to });
                }
                Outcome::Hold { wanted, reason } => {
                    debug!(train = %id, at = %from, wanted = ?wanted, %reason, "hold");
                    report.held.push(Held { train, id, at: from, wanted, reason });
                }
            }
        }

        for mv in &report.moves {
            observer.on_move(now, mv);
        }
        for exit in &report.exits {
            observer.on_exit(now, exit);
        }
        for held in &report.held {
            observer.on_hold(now, held);
        }
        observer.on_tick_end(&report);
        Ok(report)
    }

    /// Resolve names to distinct active trains, keeping first-occurrence
    /// order.
    fn requested<I, S>(&self, ids: I) -> Vec<TrainIdx>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen: Set<TrainIdx> = Set::default();
        let mut out = Vec::new();
        for name in ids {
            let name = name.as_ref();
            match self.registry.trains.lookup(name) {
                Some(t) if self.registry.trains.is_active(t) => {
                    if seen.insert(t) {
                        out.push(t);
                    }
                }
                Some(_) => trace!(train = name, "ignored: already exited"),
                None => trace!(train = name, "ignored: unknown id"),
            }
        }
        out
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Id of the train occupying section number `section`.
    pub fn get_section(&self, section: i64) -> Option<&str> {
        let section = SectionId::from_number(section).ok()?;
        self.occupant(section).map(TrainId::as_str)
    }

    /// Section number holding train `id`, or [`EXITED`] (`-1`) if the train
    /// has exited or was never admitted.
    pub fn get_train(&self, id: &str) -> i64 {
        self.train_section(id).map_or(EXITED, SectionId::as_i64)
    }

    pub fn occupant(&self, section: SectionId) -> Option<&TrainId> {
        self.registry.occupant_id(section)
    }

    pub fn train_section(&self, id: &str) -> Option<SectionId> {
        self.registry.section_of(id)
    }

    /// `None` if `id` was never admitted.
    pub fn train_status(&self, id: &str) -> Option<TrainStatus> {
        self.registry
            .trains
            .lookup(id)
            .map(|t| self.registry.trains.status[t.index()])
    }

    /// Ids of the trains still on the network, in admission order.
    pub fn active_trains(&self) -> impl Iterator<Item = &TrainId> + '_ {
        self.registry
            .trains
            .active()
            .map(|t| &self.registry.trains.ids[t.index()])
    }

    /// The tick the next `move_trains` call will run as.
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Re-check the occupancy invariants against the topology.
    pub fn check_consistency(&self) -> EngineResult<()> {
        Ok(self.registry.check_consistency(&self.topology)?)
    }
}
