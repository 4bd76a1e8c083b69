//! [`SimBBridge`] over a TraCI connection.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::time::Duration;

use cs_bridge::{BridgeError, BridgeResult, SimBBridge, SpawnRequest};
use cs_core::{EntityId, Pose, SessionRng};

use crate::client::TraciClient;
use crate::codec::Writer;
use crate::constants::*;

/// The Sim-B adapter.
///
/// Keeps the set of ids it has created so a duplicate spawn is refused
/// locally instead of surfacing as a server error.
pub struct TraciBridge {
    client:  TraciClient,
    rng:     SessionRng,
    view_id: String,
    spawned: HashSet<EntityId>,
}

impl TraciBridge {
    /// Connect to Sim-B with bounded retries and log its API version.
    pub fn connect(
        addrs:       &[SocketAddr],
        retries:     u32,
        retry_delay: Duration,
        rng:         SessionRng,
        view_id:     impl Into<String>,
    ) -> BridgeResult<Self> {
        let mut client = TraciClient::connect_with_retries(addrs, retries, retry_delay)?;
        let (api, server) = client.get_version()?;
        tracing::info!(peer = ?client.peer_addr(), api, server = %server, "Sim-B connected");
        Ok(Self::from_client(client, rng, view_id))
    }

    pub fn from_client(client: TraciClient, rng: SessionRng, view_id: impl Into<String>) -> Self {
        Self {
            client,
            rng,
            view_id: view_id.into(),
            spawned: HashSet::new(),
        }
    }

    /// Number of entities this adapter has created.
    #[inline]
    pub fn spawned_count(&self) -> usize {
        self.spawned.len()
    }

    fn set_vehicle(&mut self, var: u8, entity: &EntityId, value: &Writer) -> BridgeResult<()> {
        self.client.set_variable(CMD_SET_VEHICLE, var, entity.as_str(), value.as_slice())
    }

    fn set_gui(&mut self, var: u8, value: &Writer) -> BridgeResult<()> {
        self.client.set_variable(CMD_SET_GUI, var, &self.view_id, value.as_slice())
    }
}

fn add_full(request: &SpawnRequest) -> Writer {
    let mut w = Writer::new();
    w.compound(14)
        .typed_string(&request.route_id)
        .typed_string(&request.type_id)
        .typed_string("now")
        .typed_string(&request.lane.to_string())
        .typed_string(&request.start_offset.to_string())
        .typed_string(&request.initial_speed.to_string())
        .typed_string("current")
        .typed_string("max")
        .typed_string("current")
        .typed_string("")
        .typed_string("")
        .typed_string("")
        .typed_int(0)
        .typed_int(0);
    w
}

fn move_to_xy(pose: Pose) -> Writer {
    let mut w = Writer::new();
    w.compound(6)
        .typed_string("")
        .typed_int(0)
        .typed_double(pose.x)
        .typed_double(pose.y)
        .typed_double(pose.yaw_deg)
        .typed_byte(KEEP_ROUTE_FREE);
    w
}

fn double(value: f64) -> Writer {
    let mut w = Writer::new();
    w.typed_double(value);
    w
}

impl SimBBridge for TraciBridge {
    fn spawn(&mut self, request: &SpawnRequest) -> BridgeResult<()> {
        let id = &request.entity_id;
        if self.spawned.contains(id) {
            return Err(BridgeError::DuplicateEntity(id.clone()));
        }

        self.set_vehicle(ADD_FULL, id, &add_full(request))?;
        self.spawned.insert(id.clone());

        let mut color = Writer::new();
        color.typed_color(self.rng.color());
        self.set_vehicle(VAR_COLOR, id, &color)?;
        self.set_vehicle(VAR_LENGTH, id, &double(request.footprint.length))?;
        self.set_vehicle(VAR_WIDTH, id, &double(request.footprint.width))?;

        tracing::debug!(
            entity = %id,
            length = request.footprint.length,
            width = request.footprint.width,
            "spawned in Sim-B"
        );
        Ok(())
    }

    fn move_to(&mut self, entity: &EntityId, pose: Pose) -> BridgeResult<()> {
        match self.set_vehicle(MOVE_TO_XY, entity, &move_to_xy(pose)) {
            Err(BridgeError::Command { message, .. }) => Err(BridgeError::EntityRejected {
                entity: entity.clone(),
                message,
            }),
            other => other,
        }
    }

    fn advance_step(&mut self) -> BridgeResult<()> {
        self.client.simulation_step()
    }

    fn track(&mut self, entity: &EntityId) -> BridgeResult<()> {
        let mut w = Writer::new();
        w.typed_string(entity.as_str());
        self.set_gui(VAR_TRACK_VEHICLE, &w)
    }

    fn set_zoom(&mut self, level: f64) -> BridgeResult<()> {
        self.set_gui(VAR_VIEW_ZOOM, &double(level))
    }

    fn close(&mut self) -> BridgeResult<()> {
        self.client.close()
    }
}
