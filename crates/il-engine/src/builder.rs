//! Fluent builder for constructing an [`Interlocking`].

use il_core::SectionId;
use il_topology::{BfsRouter, Layout, Router, Topology};

use crate::{EngineError, EngineResult, Interlocking};

/// Fluent builder for [`Interlocking<R>`].
///
/// # Inputs
///
/// Exactly one track plan is required:
///
/// | Method         | Meaning                                        |
/// |----------------|------------------------------------------------|
/// | `.topology(t)` | An already-validated [`Topology`]              |
/// | `.layout(l)`   | A [`Layout`] description, validated at `build` |
///
/// Optional inputs:
///
/// | Method         | Default                               |
/// |----------------|---------------------------------------|
/// | `.router(r)`   | [`BfsRouter`]                         |
/// | `.train(..)`   | No trains; admitted in call order     |
///
/// # Example
///
/// ```rust,ignore
/// let mut il = InterlockingBuilder::new()
///     .layout(Layout::junction())
///     .train("P1", SectionId(1), SectionId(9))
///     .build()?;
/// il.move_trains(["P1"]);
/// ```
pub struct InterlockingBuilder<R: Router = BfsRouter> {
    topology: Option<Topology>,
    layout:   Option<Layout>,
    router:   R,
    trains:   Vec<(String, SectionId, SectionId)>,
}

impl InterlockingBuilder<BfsRouter> {
    pub fn new() -> Self {
        Self {
            topology: None,
            layout:   None,
            router:   BfsRouter,
            trains:   Vec::new(),
        }
    }
}

impl Default for InterlockingBuilder<BfsRouter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Router> InterlockingBuilder<R> {
    pub fn topology(mut self, topology: Topology) -> Self {
        self.topology = Some(topology);
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Replace the routing policy.
    pub fn router<R2: Router>(self, router: R2) -> InterlockingBuilder<R2> {
        InterlockingBuilder {
            topology: self.topology,
            layout:   self.layout,
            router,
            trains:   self.trains,
        }
    }

    /// Admit a train at tick 0.  Any rejection fails `build`.
    pub fn train(mut self, id: impl Into<String>, entry: SectionId, exit: SectionId) -> Self {
        self.trains.push((id.into(), entry, exit));
        self
    }

    /// Validate the track plan, admit the initial trains, and return a
    /// ready-to-run [`Interlocking`].
    pub fn build(self) -> EngineResult<Interlocking<R>> {
        let topology = match (self.topology, self.layout) {
            (Some(t), None) => t,
            (None, Some(l)) => l.build()?,
            (Some(_), Some(_)) => {
                return Err(EngineError::Config(
                    "give either a topology or a layout, not both".into(),
                ));
            }
            (None, None) => {
                return Err(EngineError::Config("no topology or layout given".into()));
            }
        };

        let mut interlocking = Interlocking::with_router(topology, self.router);
        for (id, entry, exit) in &self.trains {
            interlocking.try_add_train(id, *entry, *exit)?;
        }
        Ok(interlocking)
    }
}
