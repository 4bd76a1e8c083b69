//! Observer trait for status reporting and data collection.

use cs_core::{EntityId, Tick};

use crate::TickReport;

/// Callbacks invoked by [`SyncLoop`][crate::SyncLoop] at key points of a
/// session.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: frame counter
///
/// ```rust,ignore
/// struct FrameCounter { last: u64 }
///
/// impl SyncObserver for FrameCounter {
///     fn on_tick_end(&mut self, report: &TickReport) {
///         self.last = report.frame;
///     }
/// }
/// ```
pub trait SyncObserver {
    /// Called once the ego entity exists in Sim-B and the viewport tracks it.
    fn on_start(&mut self, _ego: &EntityId) {}

    /// Called at the very start of each tick, before Sim-A is read.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after Sim-B has been advanced.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called once after a run ends without error, after teardown.
    fn on_sync_end(&mut self, _final_tick: Tick) {}
}

/// A [`SyncObserver`] that does nothing.
pub struct NoopObserver;

impl SyncObserver for NoopObserver {}

/// Drive two observers from one loop, first `A` then `B`.
impl<A: SyncObserver, B: SyncObserver> SyncObserver for (A, B) {
    fn on_start(&mut self, ego: &EntityId) {
        self.0.on_start(ego);
        self.1.on_start(ego);
    }

    fn on_tick_start(&mut self, tick: Tick) {
        self.0.on_tick_start(tick);
        self.1.on_tick_start(tick);
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        self.0.on_tick_end(report);
        self.1.on_tick_end(report);
    }

    fn on_sync_end(&mut self, final_tick: Tick) {
        self.0.on_sync_end(final_tick);
        self.1.on_sync_end(final_tick);
    }
}
