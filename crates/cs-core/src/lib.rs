//! `cs-core` — foundational types for the `rust_cosim` bridge.
//!
//! This crate is a dependency of every other `cs-*` crate.  It has no `cs-*`
//! dependencies and knows nothing about either simulator's wire format.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentKey`, `EntityId`                                |
//! | [`pose`]        | `Pose`, `Footprint`                                   |
//! | [`calibration`] | `CalibrationRecord`, per-map JSON loader              |
//! | [`transform`]   | the Sim-A → Sim-B pose transform                      |
//! | [`time`]        | `Tick`, `RunMode`                                     |
//! | [`config`]      | `SessionConfig` and its sub-records                   |
//! | [`rng`]         | `SessionRng`, `Rgba`                                  |
//! | [`error`]       | `CoreError`, `CoreResult`                             |

pub mod calibration;
pub mod config;
pub mod error;
pub mod ids;
pub mod pose;
pub mod rng;
pub mod time;
pub mod transform;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use calibration::{CalibrationRecord, calibration_from_reader, calibration_path, load_calibration};
pub use config::{EgoConfig, MirrorConfig, QualityLevel, SessionConfig, ViewportConfig};
pub use error::{CoreError, CoreResult};
pub use ids::{AgentKey, EntityId};
pub use pose::{Footprint, Pose};
pub use rng::{Rgba, SessionRng};
pub use time::{RunMode, Tick};
pub use transform::transform;
