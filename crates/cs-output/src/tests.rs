//! Unit tests for cs-output.

#[cfg(test)]
mod fixtures {
    use cs_bridge::{CollisionCounters, EgoState};
    use cs_core::{Pose, Tick};
    use cs_sync::TickReport;

    pub fn report(tick: u64, agents: usize) -> TickReport {
        TickReport {
            tick:              Tick(tick),
            frame:             100 + tick,
            game_timestamp_ms: 50 * tick,
            ego:               EgoState {
                pose:                Pose::new(12.34, -5.0, 90.0),
                forward_speed:       3.25,
                collision:           CollisionCounters { vehicles: 0.0, pedestrians: 0.0, other: 0.0 },
                other_lane_fraction: 0.25,
                ..Default::default()
            },
            ego_pose_b:        Pose::new(1.5, 2.25, -90.0),
            agents_observed:   agents,
            vehicles_observed: agents,
            mirrored_total:    2,
            spawned:           1,
            moved:             2,
            skipped:           0,
            move_failures:     0,
        }
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::TickSummaryRow;
    use crate::writer::OutputWriter;

    use super::fixtures::report;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_file_created_with_header() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, TickSummaryRow::HEADER);
        assert_eq!(rdr.records().count(), 0);
    }

    #[test]
    fn csv_tick_summary_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow::from_report(&report(3, 4))).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");       // tick
        assert_eq!(&rows[0][1], "103");     // frame
        assert_eq!(&rows[0][2], "150");     // game_timestamp_ms
        assert_eq!(&rows[0][3], "1.500");   // ego_x in Sim-B
        assert_eq!(&rows[0][4], "2.250");
        assert_eq!(&rows[0][5], "-90.000");
        assert_eq!(&rows[0][6], "3.250");   // speed
        assert_eq!(&rows[0][7], "4");       // agents_observed
        assert_eq!(&rows[0][10], "1");      // spawned
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_missing_dir_is_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("nope")).is_err());
    }
}

#[cfg(test)]
mod status {
    use cs_core::Tick;
    use cs_sync::SyncObserver;

    use crate::{StatusLine, format_status};

    use super::fixtures::report;

    #[test]
    fn line_format() {
        assert_eq!(
            format_status(&report(0, 4)),
            "Vehicle at (12.3, -5.0), roll 0.0, pitch 0.0, yaw 90.0, 3.25 m/s, \
             Collision: {vehicles=0, pedestrians=0, other=0}, \
             25% other lane, 0% off-road, (4 agents)"
        );
    }

    #[test]
    fn shorter_line_is_padded() {
        let mut status = StatusLine::new(Vec::new());
        status.on_tick_end(&report(0, 10));
        status.on_tick_end(&report(1, 4));
        status.on_sync_end(Tick(2));
        assert!(status.take_error().is_none());

        let long = format_status(&report(0, 10));
        let short = format_status(&report(1, 4));
        assert_eq!(long.len(), short.len() + 1);

        let out = String::from_utf8(status.into_inner()).unwrap();
        assert_eq!(out, format!("\r{long}\r{short} \n"));
    }

    #[test]
    fn no_newline_without_ticks() {
        let mut status = StatusLine::new(Vec::new());
        status.on_sync_end(Tick::ZERO);
        assert!(status.into_inner().is_empty());
    }
}

#[cfg(test)]
mod observer {
    use std::io;

    use cs_core::Tick;
    use cs_sync::SyncObserver;

    use crate::{
        BridgeOutputObserver, CsvWriter, OutputError, OutputResult, OutputWriter, StatusLine,
        TickSummaryRow,
    };

    use super::fixtures::report;

    /// Fails every write with a distinct message.
    struct FailingWriter {
        calls: u32,
    }

    impl OutputWriter for FailingWriter {
        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(io::Error::other(format!("write {}", self.calls))))
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn rows_follow_ticks() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = (StatusLine::new(Vec::new()), BridgeOutputObserver::new(writer));

        for t in 0..3 {
            obs.on_tick_start(Tick(t));
            obs.on_tick_end(&report(t, 1));
        }
        obs.on_sync_end(Tick(3));

        assert!(obs.1.take_error().is_none());
        assert_eq!(obs.1.rows_written(), 3);

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let ticks: Vec<String> = rdr.records().map(|r| r.unwrap()[0].to_owned()).collect();
        assert_eq!(ticks, ["0", "1", "2"]);
        assert!(!obs.0.into_inner().is_empty());
    }

    #[test]
    fn first_error_is_kept() {
        let mut obs = BridgeOutputObserver::new(FailingWriter { calls: 0 });
        obs.on_tick_end(&report(0, 0));
        obs.on_tick_end(&report(1, 0));

        let err = obs.take_error().expect("stored error");
        assert_eq!(err.to_string(), "I/O error: write 1");
        assert!(obs.take_error().is_none());
        assert_eq!(obs.rows_written(), 0);
        assert_eq!(obs.into_writer().calls, 2);
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use rusqlite::Connection;

    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;
    use crate::TickSummaryRow;

    use super::fixtures::report;

    #[test]
    fn sqlite_rows_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow::from_report(&report(0, 2))).unwrap();
        w.write_tick_summary(&TickSummaryRow::from_report(&report(1, 3))).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let conn = Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM tick_summaries", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);
        let agents: i64 = conn
            .query_row("SELECT agents_observed FROM tick_summaries WHERE tick = 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(agents, 3);
    }

    #[test]
    fn duplicate_tick_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let row = TickSummaryRow::from_report(&report(0, 2));
        w.write_tick_summary(&row).unwrap();
        assert!(w.write_tick_summary(&row).is_err());
    }
}
