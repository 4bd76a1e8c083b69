//! The Sim-B side of the bridge: create, teleport, and step entities.

use cs_core::{EntityId, Footprint, MirrorConfig, Pose};

use crate::BridgeResult;

/// Everything needed to create one controllable entity in Sim-B.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnRequest {
    pub entity_id:     EntityId,
    pub route_id:      String,
    pub type_id:       String,
    pub footprint:     Footprint,
    pub lane:          u32,
    /// Metres along the route's first edge.
    pub start_offset:  f64,
    /// Metres per second.
    pub initial_speed: f64,
}

impl SpawnRequest {
    /// A request for `entity_id` using the session's mirror placement.
    pub fn new(entity_id: EntityId, footprint: Footprint, mirror: &MirrorConfig) -> Self {
        Self {
            entity_id,
            route_id:      mirror.route_id.clone(),
            type_id:       mirror.type_id.clone(),
            footprint,
            lane:          mirror.lane,
            start_offset:  mirror.start_offset,
            initial_speed: mirror.initial_speed,
        }
    }
}

/// Control surface of the traffic simulator.
///
/// Calls between two [`advance_step`][Self::advance_step]s take effect at the
/// next step.
pub trait SimBBridge {
    /// Create an entity with a random display colour and the requested
    /// footprint.  Fails if the id already exists.
    fn spawn(&mut self, request: &SpawnRequest) -> BridgeResult<()>;

    /// Teleport `entity` to `pose`, overriding Sim-B's own dynamics for this
    /// step.  The lane is inferred from the coordinates.
    ///
    /// An unknown or rejected entity is reported as an entity-scoped error
    /// (see [`BridgeError::is_entity_scoped`][crate::BridgeError::is_entity_scoped]).
    fn move_to(&mut self, entity: &EntityId, pose: Pose) -> BridgeResult<()>;

    /// Advance Sim-B by one step.
    fn advance_step(&mut self) -> BridgeResult<()>;

    /// Point the operator's viewport at `entity`.
    fn track(&mut self, entity: &EntityId) -> BridgeResult<()>;

    fn set_zoom(&mut self, level: f64) -> BridgeResult<()>;

    /// Close the connection.  Called once, from teardown.
    fn close(&mut self) -> BridgeResult<()>;
}
