//! `BridgeOutputObserver<W>`: feeds `SyncObserver` events to an `OutputWriter`.

use cs_core::Tick;
use cs_sync::{SyncObserver, TickReport};

use crate::row::TickSummaryRow;
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SyncObserver`] that writes one summary row per tick to any
/// [`OutputWriter`] backend (CSV, SQLite).
///
/// Errors from the writer are stored internally because `SyncObserver`
/// methods have no return value.  After `run()` returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct BridgeOutputObserver<W: OutputWriter> {
    writer:     W,
    rows:       u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> BridgeOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Rows written so far.
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    /// Flush the writer.  Needed when a run ends in an error, since
    /// `on_sync_end` is then never called.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "output write failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SyncObserver for BridgeOutputObserver<W> {
    fn on_tick_end(&mut self, report: &TickReport) {
        let row = TickSummaryRow::from_report(report);
        let result = self.writer.write_tick_summary(&row);
        if result.is_ok() {
            self.rows += 1;
        }
        self.store_err(result);
    }

    fn on_sync_end(&mut self, final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
        tracing::info!(rows = self.rows, %final_tick, "output finished");
    }
}
