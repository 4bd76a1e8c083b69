//! CSV output backend.
//!
//! Creates `tick_summaries.csv` in the configured output directory.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow};

/// Writes one CSV row per tick.
pub struct CsvWriter {
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) `tick_summaries.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(TickSummaryRow::HEADER)?;
        Ok(Self { summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.frame.to_string(),
            row.game_timestamp_ms.to_string(),
            format!("{:.3}", row.ego_x),
            format!("{:.3}", row.ego_y),
            format!("{:.3}", row.ego_yaw),
            format!("{:.3}", row.ego_speed),
            row.agents_observed.to_string(),
            row.vehicles_observed.to_string(),
            row.mirrored_total.to_string(),
            row.spawned.to_string(),
            row.moved.to_string(),
            row.skipped.to_string(),
            row.move_failures.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        Ok(())
    }
}
