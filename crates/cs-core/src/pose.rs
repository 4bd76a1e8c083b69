//! Planar pose and vehicle footprint value types.
//!
//! Both simulators are treated as 2-D for synchronization purposes: Sim-B has
//! no notion of elevation, so only `(x, y, yaw)` crosses the bridge.  Values
//! are `f64` because Sim-A map coordinates routinely exceed the range where
//! `f32` keeps centimetre precision.

use serde::{Deserialize, Serialize};

/// Position and heading of one entity at one tick.
///
/// `yaw_deg` is in degrees, following both simulators' APIs.  A `Pose` is a
/// snapshot: produce a new one rather than mutating an old one.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub x:       f64,
    pub y:       f64,
    pub yaw_deg: f64,
}

impl Pose {
    #[inline]
    pub fn new(x: f64, y: f64, yaw_deg: f64) -> Self {
        Self { x, y, yaw_deg }
    }
}

impl std::fmt::Display for Pose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1}) yaw {:.1}", self.x, self.y, self.yaw_deg)
    }
}

/// Geometric extent of a vehicle.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Longitudinal extent, bumper to bumper.
    pub length: f64,
    /// Lateral extent.
    pub width:  f64,
}

impl Footprint {
    #[inline]
    pub fn new(length: f64, width: f64) -> Self {
        Self { length, width }
    }

    /// Build a footprint from bounding-box half-extents `(hx, hy)` as reported
    /// by Sim-A.
    #[inline]
    pub fn from_half_extents(hx: f64, hy: f64) -> Self {
        Self { length: hx * 2.0, width: hy * 2.0 }
    }

    /// Half of the longitudinal extent, the offset between a vehicle's centre
    /// and its front bumper.
    #[inline]
    pub fn half_length(self) -> f64 {
        self.length * 0.5
    }
}
