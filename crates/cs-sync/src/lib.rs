//! `cs-sync` — lockstep orchestrator for the rust_cosim bridge.
//!
//! # Tick loop
//!
//! ```text
//! start():  spawn ego in Sim-B → track it → set zoom
//!
//! while run_mode allows and the stop flag is lowered:
//!   ① Read     : SimABridge::step() → WorldSnapshot
//!   ② Control  : ControlSource::next_directive → SimABridge::send_control
//!   ③ Ego      : transform(ego pose, calib, length / 2) → move_to
//!   ④ Agents   : for each observed vehicle, in report order:
//!                  unknown      → register, spawn (doubled half-extents)
//!                  registered   → transform(pose, calib, extent.x) → move_to
//!                  full, unseen → skip
//!   ⑤ Advance  : SimBBridge::advance_step()
//!
//! teardown(): close Sim-B, then Sim-A (each attempted)
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cs_bridge::Autopilot;
//! use cs_sync::{NoopObserver, StopFlag, run_session};
//!
//! let outcome = run_session(
//!     &config,
//!     calibration,
//!     &mut connector,
//!     || TraciBridge::connect(&sim_b_addrs, 10, backoff, rng, "View #0"),
//!     Autopilot,
//!     StopFlag::new(),
//!     &mut NoopObserver,
//! )?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod session;
pub mod state;
pub mod sync;


pub use builder::{DEFAULT_CAPACITY, SyncBuilder};
pub use error::{SyncError, SyncResult};
pub use observer::{NoopObserver, SyncObserver};
pub use report::TickReport;
pub use session::{establish, run_session};
pub use state::{LoopState, StopFlag, TeardownReport, Termination};
pub use sync::SyncLoop;
