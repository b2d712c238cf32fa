//! Tick observer trait for journaling and diagnostics.

use il_core::Tick;

use crate::{Held, TickReport, TrainExit, TrainMove};

/// Callbacks invoked by [`Interlocking::step`][crate::Interlocking::step]
/// once the tick's outcome has been committed.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Hooks fire in this order: start, every
/// move, every exit, every hold, end.
///
/// # Example: hold counter
///
/// ```rust,ignore
/// struct HoldCounter(usize);
///
/// impl TickObserver for HoldCounter {
///     fn on_hold(&mut self, _tick: Tick, _held: &Held) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait TickObserver {
    /// Called before resolution with the number of distinct requested ids.
    fn on_tick_start(&mut self, _tick: Tick, _requested: usize) {}

    fn on_move(&mut self, _tick: Tick, _mv: &TrainMove) {}

    fn on_exit(&mut self, _tick: Tick, _exit: &TrainExit) {}

    fn on_hold(&mut self, _tick: Tick, _held: &Held) {}

    /// Called last with the complete report.
    fn on_tick_end(&mut self, _report: &TickReport) {}
}

/// A [`TickObserver`] that does nothing.
pub struct NoopObserver;

impl TickObserver for NoopObserver {}
