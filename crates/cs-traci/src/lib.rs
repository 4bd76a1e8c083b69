//! `cs-traci` — Sim-B over the TraCI protocol.
//!
//! | Module        | Contents                                         |
//! |---------------|--------------------------------------------------|
//! | [`constants`] | command, variable, and type ids                  |
//! | [`codec`]     | big-endian `Writer`/`Reader`, framing, `Status`  |
//! | [`client`]    | `TraciClient`: blocking request/response over TCP |
//! | [`bridge`]    | `TraciBridge`: the `SimBBridge` implementation   |
//!
//! Codec failures surface as [`cs_bridge::BridgeError::Protocol`]; a non-OK
//! status surfaces as [`cs_bridge::BridgeError::Command`].

pub mod bridge;
pub mod client;
pub mod codec;
pub mod constants;


pub use bridge::TraciBridge;
pub use client::TraciClient;
pub use codec::{Reader, Status, Writer};
