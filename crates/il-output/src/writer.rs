//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, TickSummaryRow, TrainEventRow};

/// Trait implemented by journal backends.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with [`JournalObserver::take_error`].
///
/// [`JournalObserver::take_error`]: crate::JournalObserver::take_error
pub trait OutputWriter {
    /// Write one tick's train events, in report order.
    fn write_events(&mut self, rows: &[TrainEventRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
