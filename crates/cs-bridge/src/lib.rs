//! `cs-bridge` — the simulator boundary of the rust_cosim bridge.
//!
//! Everything the sync loop knows about either simulator passes through the
//! types and traits defined here:
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`snapshot`] | `WorldSnapshot`, `EgoState`, `ObservedAgent`, `AgentKind`  |
//! | [`control`]  | `ControlCommand`, `ControlDirective`, `ControlSource`      |
//! | [`sim_a`]    | `SimABridge`, `SimAConnector`                              |
//! | [`sim_b`]    | `SimBBridge`, `SpawnRequest`                               |
//! | [`gateway`]  | NDJSON-over-TCP Sim-A client                               |
//! | [`error`]    | `BridgeError`, `BridgeResult`                              |
//!
//! The Sim-B TraCI adapter lives in its own crate, `cs-traci`.

pub mod control;
pub mod error;
pub mod gateway;
pub mod sim_a;
pub mod sim_b;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use control::{Autopilot, ControlCommand, ControlDirective, ControlSource, Neutral};
pub use error::{BridgeError, BridgeResult};
pub use gateway::{EpisodeSettings, GatewayClient, GatewayConnector};
pub use sim_a::{SimABridge, SimAConnector};
pub use sim_b::{SimBBridge, SpawnRequest};
pub use snapshot::{AgentKind, BoxExtent, CollisionCounters, EgoState, ObservedAgent, WorldSnapshot};
