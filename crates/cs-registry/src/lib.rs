//! `cs-registry` — bookkeeping of mirrored agents for the rust_cosim bridge.
//!
//! A single [`IdentityRegistry`] is owned by the sync loop for the lifetime of
//! a session.  It answers one question per observed agent, "does this agent
//! need to be spawned in Sim-B?", under a fixed capacity.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | Use `FxHashMap` instead of SipHash for the identity map. |

pub mod error;
pub mod registry;

#[cfg(test)]
mod tests;

pub use error::{RegistryError, RegistryResult};
pub use registry::{IdentityRegistry, RegistryEntry};
