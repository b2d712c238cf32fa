//! `JournalObserver<W>`: bridges `TickObserver` to an `OutputWriter`.

use il_core::{EXITED, SectionId, Tick};
use il_engine::{Held, TickObserver, TickReport, TrainExit, TrainMove};

use crate::row::{EventKind, TickSummaryRow, TrainEventRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`TickObserver`] that journals every move, exit and hold plus one
/// summary row per tick to any [`OutputWriter`] backend.
///
/// Events are buffered during a tick and written in one batch at tick end.
/// Errors from the writer are stored internally because observer hooks have
/// no return value; check with [`take_error`][Self::take_error].
pub struct JournalObserver<W: OutputWriter> {
    writer:     W,
    pending:    Vec<TrainEventRow>,
    requested:  u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> JournalObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pending:    Vec::new(),
            requested:  0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the backend.  Call once after the last tick.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files afterwards).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn push(&mut self, tick: Tick, train: &str, kind: EventKind, from: i64, to: i64, detail: String) {
        self.pending.push(TrainEventRow {
            tick: tick.0,
            train: train.to_owned(),
            kind,
            from,
            to,
            detail,
        });
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> TickObserver for JournalObserver<W> {
    fn on_tick_start(&mut self, _tick: Tick, requested: usize) {
        self.pending.clear();
        self.requested = requested as u64;
    }

    fn on_move(&mut self, tick: Tick, mv: &TrainMove) {
        self.push(tick, mv.id.as_str(), EventKind::Move, mv.from.as_i64(), mv.to.as_i64(), String::new());
    }

    fn on_exit(&mut self, tick: Tick, exit: &TrainExit) {
        self.push(tick, exit.id.as_str(), EventKind::Exit, exit.at.as_i64(), EXITED, String::new());
    }

    fn on_hold(&mut self, tick: Tick, held: &Held) {
        let to = held.wanted.map_or(EXITED, SectionId::as_i64);
        self.push(tick, held.id.as_str(), EventKind::Hold, held.at.as_i64(), to, held.reason.to_string());
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        let events = std::mem::take(&mut self.pending);
        if !events.is_empty() {
            let result = self.writer.write_events(&events);
            self.store_err(result);
        }
        let row = TickSummaryRow {
            tick:      report.tick.0,
            requested: self.requested,
            moved:     report.moves.len() as u64,
            exited:    report.exits.len() as u64,
            held:      report.held.len() as u64,
            changed:   report.changed() as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }
}
