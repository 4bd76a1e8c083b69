//! The Sim-A side of the bridge: read frames, send ego control.

use crate::{BridgeResult, ControlDirective, WorldSnapshot};

/// Per-tick accessor over the driving simulator.
///
/// Implementations translate the simulator's native measurements into a
/// [`WorldSnapshot`] immediately; nothing native leaks past this trait.
pub trait SimABridge {
    /// Read the next frame.
    ///
    /// A transport failure here is fatal for the running session; retries
    /// belong to [`SimAConnector::connect`].
    fn step(&mut self) -> BridgeResult<WorldSnapshot>;

    /// Forward `directive` to the ego vehicle for the frame just read.
    fn send_control(&mut self, directive: ControlDirective) -> BridgeResult<()>;

    /// Release the connection.  Called once, from teardown.
    fn close(&mut self) -> BridgeResult<()>;
}

/// Session establishment against Sim-A.
///
/// The session layer calls `connect` repeatedly while it fails with a
/// transport error, so implementations must leave no half-open state behind
/// on failure.
pub trait SimAConnector {
    type Bridge: SimABridge;

    fn connect(&mut self) -> BridgeResult<Self::Bridge>;
}
