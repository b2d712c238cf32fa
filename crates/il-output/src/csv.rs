//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `train_events.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow, TrainEventRow};

/// Writes the tick journal to two CSV files.
pub struct CsvWriter {
    events:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the directory if needed, open the two CSV files in `dir` and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut events = Writer::from_path(dir.join("train_events.csv"))?;
        events.write_record(["tick", "train", "event", "from", "to", "detail"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "requested", "moved", "exited", "held", "changed"])?;

        Ok(Self {
            events,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_events(&mut self, rows: &[TrainEventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.tick.to_string(),
                row.train.clone(),
                row.kind.as_str().to_owned(),
                row.from.to_string(),
                row.to.to_string(),
                row.detail.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.requested.to_string(),
            row.moved.to_string(),
            row.exited.to_string(),
            row.held.to_string(),
            row.changed.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
