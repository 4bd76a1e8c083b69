//! Bridge time model.
//!
//! # Design
//!
//! The bridge has no clock of its own.  One `Tick` is one lockstep iteration:
//! one Sim-A frame read and one Sim-B step.  Wall time is whatever the
//! simulators take to answer, so only the counter is tracked here.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute bridge tick counter.  `Tick(0)` is the first tick of a session.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The following tick.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── RunMode ───────────────────────────────────────────────────────────────────

/// How long a session runs.  Defaults to [`RunMode::Demo`].
///
/// In JSON: `"demo"` or `{ "bounded": { "max_step": 100 } }`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Run until the operator interrupts.
    #[default]
    Demo,
    /// Keep stepping while the number of completed ticks is `<= max_step`,
    /// i.e. `max_step + 1` ticks in total.
    Bounded { max_step: u64 },
}

impl RunMode {
    /// Whether another tick should run after `completed` ticks.
    #[inline]
    pub fn should_continue(self, completed: u64) -> bool {
        match self {
            RunMode::Demo => true,
            RunMode::Bounded { max_step } => completed <= max_step,
        }
    }
}
