//! Per-frame world state read from Sim-A.
//!
//! These are the only shapes in which Sim-A data leaves its adapter.  Fields
//! that Sim-A may omit carry `#[serde(default)]` so a sparse gateway can still
//! be parsed.

use serde::{Deserialize, Serialize};

use cs_core::{AgentKey, Footprint, Pose};

use crate::ControlCommand;

/// What kind of participant an observed agent is.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    #[default]
    Vehicle,
    Pedestrian,
    TrafficLight,
    SpeedLimitSign,
}

/// Bounding-box half-extents, as Sim-A reports them.
#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct BoxExtent {
    /// Longitudinal half-extent.
    pub x: f64,
    /// Lateral half-extent.
    pub y: f64,
}

impl BoxExtent {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn footprint(self) -> Footprint {
        Footprint::from_half_extents(self.x, self.y)
    }

    #[inline]
    pub fn half_length(self) -> f64 {
        self.x
    }
}

/// A non-ego participant seen in one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObservedAgent {
    pub key:           AgentKey,
    #[serde(default)]
    pub kind:          AgentKind,
    pub pose:          Pose,
    #[serde(default)]
    pub extent:        BoxExtent,
    #[serde(default)]
    pub forward_speed: f64,
}

impl ObservedAgent {
    #[inline]
    pub fn is_vehicle(&self) -> bool {
        self.kind == AgentKind::Vehicle
    }
}

/// Accumulated collision intensities reported for the ego vehicle.
#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct CollisionCounters {
    pub vehicles:    f64,
    pub pedestrians: f64,
    pub other:       f64,
}

/// State of the ego vehicle in one frame.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EgoState {
    pub pose:                Pose,
    pub roll:                f64,
    pub pitch:               f64,
    pub extent:              BoxExtent,
    /// Metres per second along the heading.
    pub forward_speed:       f64,
    pub collision:           CollisionCounters,
    /// Fraction of the footprint over the opposite lane, `[0, 1]`.
    pub other_lane_fraction: f64,
    /// Fraction of the footprint off the road, `[0, 1]`.
    pub offroad_fraction:    f64,
    /// The command Sim-A's own autopilot would apply this frame.
    pub autopilot:           ControlCommand,
}

/// Everything Sim-A reports for one frame.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub frame:             u64,
    #[serde(default)]
    pub game_timestamp_ms: u64,
    pub ego:               EgoState,
    /// In the order Sim-A reported them.  The order carries no meaning.
    #[serde(default)]
    pub agents:            Vec<ObservedAgent>,
}

impl WorldSnapshot {
    /// Observed vehicles only.
    pub fn vehicles(&self) -> impl Iterator<Item = &ObservedAgent> {
        self.agents.iter().filter(|a| a.is_vehicle())
    }
}
