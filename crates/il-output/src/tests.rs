//! Integration tests for il-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{EventKind, TickSummaryRow, TrainEventRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn move_row(tick: u64, train: &str, from: i64, to: i64) -> TrainEventRow {
        TrainEventRow {
            tick,
            train:  train.to_owned(),
            kind:   EventKind::Move,
            from,
            to,
            detail: String::new(),
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("train_events.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("a");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("train_events.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("train_events.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["tick", "train", "event", "from", "to", "detail"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["tick", "requested", "moved", "exited", "held", "changed"]);
    }

    #[test]
    fn csv_event_rows_written_in_order() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_events(&[move_row(2, "P1", 1, 5), move_row(2, "P2", 10, 6)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("train_events.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "P1");
        assert_eq!(&rows[0][2], "move");
        assert_eq!(&rows[0][4], "5");
        assert_eq!(&rows[1][3], "10");
    }

    #[test]
    fn csv_tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick: 3, requested: 4, moved: 2, exited: 1, held: 2, changed: 2,
        })
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["3", "4", "2", "1", "2", "2"]);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

// ── Journal observer ──────────────────────────────────────────────────────────

#[cfg(test)]
mod journal_tests {
    use il_engine::Interlocking;
    use il_topology::Layout;
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::observer::JournalObserver;
    use crate::row::{EventKind, TickSummaryRow, TrainEventRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    /// Keeps rows in memory.
    #[derive(Default)]
    struct VecWriter {
        events:    Vec<TrainEventRow>,
        summaries: Vec<TickSummaryRow>,
    }

    impl OutputWriter for VecWriter {
        fn write_events(&mut self, rows: &[TrainEventRow]) -> OutputResult<()> {
            self.events.extend_from_slice(rows);
            Ok(())
        }
        fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
            self.summaries.push(*row);
            Ok(())
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    /// Fails every write.
    struct BrokenWriter;

    impl OutputWriter for BrokenWriter {
        fn write_events(&mut self, _rows: &[TrainEventRow]) -> OutputResult<()> {
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }
        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            Err(OutputError::Io(std::io::Error::other("still full")))
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    fn junction() -> Interlocking {
        Interlocking::new(Layout::junction().build().unwrap())
    }

    #[test]
    fn journal_records_scenario_b() {
        let mut il = junction();
        il.add_train("F1", 3, 11);
        il.add_train("P1", 1, 9);

        let mut journal = JournalObserver::new(VecWriter::default());
        for batch in [["F1", "P1"], ["F1", "P1"], ["F1", "P1"], ["F1", "P1"]] {
            il.step(batch, &mut journal).unwrap();
        }
        assert!(journal.take_error().is_none());
        let w = journal.into_writer();

        // T0: F1 3→7, P1 1→5.  T1: F1 yields, P1 5→6.
        // T2: F1 yields, P1 6→9 and exits.  T3: F1 7→11 and exits.
        let changed: Vec<u64> = w.summaries.iter().map(|s| s.changed).collect();
        assert_eq!(changed, vec![2, 1, 1, 1]);

        let holds: Vec<_> = w.events.iter().filter(|e| e.kind == EventKind::Hold).collect();
        assert_eq!(holds.len(), 2);
        assert!(holds.iter().all(|h| h.train == "F1" && h.detail == "yield at CROSS"));
        assert_eq!(holds[0].to, 11);

        let last: Vec<_> = w.events.iter().filter(|e| e.tick == 3).collect();
        assert_eq!(last.len(), 2);
        assert_eq!((last[0].kind, last[0].from, last[0].to), (EventKind::Move, 7, 11));
        assert_eq!((last[1].kind, last[1].from, last[1].to), (EventKind::Exit, 11, -1));
    }

    #[test]
    fn summary_written_for_quiet_ticks() {
        let mut il = junction();
        let mut journal = JournalObserver::new(VecWriter::default());
        il.step(["nobody"], &mut journal).unwrap();
        let w = journal.into_writer();
        assert!(w.events.is_empty());
        assert_eq!(w.summaries.len(), 1);
        assert_eq!(w.summaries[0].requested, 0);
    }

    #[test]
    fn first_error_is_kept() {
        let mut il = junction();
        il.add_train("P1", 1, 9);
        let mut journal = JournalObserver::new(BrokenWriter);
        il.step(["P1"], &mut journal).unwrap();

        let err = journal.take_error().expect("write error stored");
        assert!(err.to_string().contains("disk full"), "{err}");
        assert!(journal.take_error().is_none());
        // The engine itself is unaffected.
        assert_eq!(il.get_train("P1"), 5);
    }

    #[test]
    fn integration_csv() {
        let dir = tmp();
        let mut il = junction();
        il.add_train("P1", 1, 9);

        let mut journal = JournalObserver::new(CsvWriter::new(dir.path()).unwrap());
        for _ in 0..3 {
            il.step(["P1"], &mut journal).unwrap();
        }
        journal.finish().unwrap();
        assert!(journal.take_error().is_none());

        // 3 moves + 1 exit.
        let mut rdr = csv::Reader::from_path(dir.path().join("train_events.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(&rows[3][2], "exit");

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count(), 3);
    }
}
