//! Loop lifecycle, run outcomes, and the stop flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use cs_bridge::BridgeError;

/// Lifecycle of a [`SyncLoop`][crate::SyncLoop].
///
/// ```text
/// Uninitialized ──start()──▶ Running ──stop / bound / failure──▶ Terminated
/// ```
///
/// `Terminated` is final; a terminated loop cannot be resumed.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LoopState {
    Uninitialized,
    Running,
    Terminated,
}

/// How a successful [`run`][crate::SyncLoop::run] ended.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Termination {
    /// The bounded run mode reached its last tick.
    Completed { ticks: u64 },
    /// The stop flag was raised.
    Cancelled { ticks: u64 },
}

impl Termination {
    pub fn ticks(self) -> u64 {
        match self {
            Termination::Completed { ticks } | Termination::Cancelled { ticks } => ticks,
        }
    }

    pub fn is_cancelled(self) -> bool {
        matches!(self, Termination::Cancelled { .. })
    }
}

/// Outcome of closing both simulator connections.
///
/// Each close is attempted even if the other fails.
#[derive(Debug, Default)]
pub struct TeardownReport {
    /// False when teardown had already run and nothing was attempted.
    pub performed: bool,
    pub sim_b:     Option<BridgeError>,
    pub sim_a:     Option<BridgeError>,
}

impl TeardownReport {
    pub fn is_clean(&self) -> bool {
        self.sim_a.is_none() && self.sim_b.is_none()
    }
}

// ── Stop flag ─────────────────────────────────────────────────────────────────

/// Cooperative cancellation shared between the loop and whoever may stop it
/// (a signal handler, a test).  Checked between ticks and between connection
/// attempts.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
