//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! one table, `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow};

/// Writes bridge output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick              INTEGER PRIMARY KEY,
                 frame             INTEGER NOT NULL,
                 game_timestamp_ms INTEGER NOT NULL,
                 ego_x             REAL    NOT NULL,
                 ego_y             REAL    NOT NULL,
                 ego_yaw           REAL    NOT NULL,
                 ego_speed         REAL    NOT NULL,
                 agents_observed   INTEGER NOT NULL,
                 vehicles_observed INTEGER NOT NULL,
                 mirrored_total    INTEGER NOT NULL,
                 spawned           INTEGER NOT NULL,
                 moved             INTEGER NOT NULL,
                 skipped           INTEGER NOT NULL,
                 move_failures     INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, frame, game_timestamp_ms, ego_x, ego_y, ego_yaw, ego_speed, \
              agents_observed, vehicles_observed, mirrored_total, spawned, moved, \
              skipped, move_failures) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            rusqlite::params![
                row.tick as i64,
                row.frame as i64,
                row.game_timestamp_ms as i64,
                row.ego_x,
                row.ego_y,
                row.ego_yaw,
                row.ego_speed,
                row.agents_observed,
                row.vehicles_observed,
                row.mirrored_total,
                row.spawned,
                row.moved,
                row.skipped,
                row.move_failures,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
