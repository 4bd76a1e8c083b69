//! The per-tick console status line.
//!
//! One line, overwritten in place every tick with a carriage return.

use std::io::{self, Write};

use cs_core::Tick;
use cs_sync::{SyncObserver, TickReport};

/// Render the status line for one tick.
///
/// Position and orientation are Sim-A's; lane and off-road fractions are
/// shown as percentages.
pub fn format_status(report: &TickReport) -> String {
    let ego = &report.ego;
    format!(
        "Vehicle at ({:.1}, {:.1}), roll {:.1}, pitch {:.1}, yaw {:.1}, {:.2} m/s, \
         Collision: {{vehicles={:.0}, pedestrians={:.0}, other={:.0}}}, \
         {:.0}% other lane, {:.0}% off-road, ({} agents)",
        ego.pose.x,
        ego.pose.y,
        ego.roll,
        ego.pitch,
        ego.pose.yaw_deg,
        ego.forward_speed,
        ego.collision.vehicles,
        ego.collision.pedestrians,
        ego.collision.other,
        100.0 * ego.other_lane_fraction,
        100.0 * ego.offroad_fraction,
        report.agents_observed,
    )
}

/// A [`SyncObserver`] that keeps one status line up to date on `out`.
///
/// A shorter line is padded with spaces so nothing of the previous one is
/// left behind.  The line is terminated with a newline when the run ends.
pub struct StatusLine<W: Write> {
    out:        W,
    last_len:   usize,
    last_error: Option<io::Error>,
}

impl<W: Write> StatusLine<W> {
    pub fn new(out: W) -> Self {
        Self { out, last_len: 0, last_error: None }
    }

    /// Take the first write error, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.last_error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn overwrite(&mut self, line: &str) -> io::Result<()> {
        let pad = self.last_len.saturating_sub(line.len());
        write!(self.out, "\r{line}{:pad$}", "")?;
        self.out.flush()?;
        self.last_len = line.len();
        Ok(())
    }

    fn store_err(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: Write> SyncObserver for StatusLine<W> {
    fn on_tick_end(&mut self, report: &TickReport) {
        let line = format_status(report);
        let result = self.overwrite(&line);
        self.store_err(result);
    }

    fn on_sync_end(&mut self, _final_tick: Tick) {
        if self.last_len == 0 {
            return;
        }
        let result = writeln!(self.out).and_then(|()| self.out.flush());
        self.store_err(result);
    }
}
