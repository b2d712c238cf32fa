//! `il-output`: tick journal writers for the interlocking engine.
//!
//! | Backend | Files created                              |
//! |---------|--------------------------------------------|
//! | CSV     | `train_events.csv`, `tick_summaries.csv`   |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`JournalObserver`], which implements `il_engine::TickObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use il_output::{CsvWriter, JournalObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut journal = JournalObserver::new(writer);
//! interlocking.step(["P1", "F1"], &mut journal)?;
//! journal.finish()?;
//! if let Some(e) = journal.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::JournalObserver;
pub use row::{EventKind, TickSummaryRow, TrainEventRow};
pub use writer::OutputWriter;
