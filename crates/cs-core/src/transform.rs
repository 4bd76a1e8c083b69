//! Sim-A → Sim-B pose transform.
//!
//! The two simulators disagree on two things:
//!
//! 1. Axis scale and origin, corrected by the affine part of
//!    [`CalibrationRecord`].
//! 2. The anchor point of a vehicle.  Sim-A reports the geometric centre,
//!    Sim-B positions a vehicle by its front bumper.  The anchor is moved by
//!    `half_length` along the corrected heading.
//!
//! Headings follow the navigation convention (0° points along +y, angles grow
//! clockwise), hence `sin` on the x term and `cos` on the y term.
//!
//! ```text
//! yaw' = yaw + angle_offset
//! x'   = x_scale * x + x_offset + sin(yaw') * half_length
//! y'   = y_scale * y + y_offset + cos(yaw') * half_length
//! ```

use crate::{CalibrationRecord, Pose};

/// Map a Sim-A pose into Sim-B's frame.
///
/// `half_length` is the longitudinal half-extent of the observed vehicle.
/// Pure arithmetic, no failure modes.
#[inline]
pub fn transform(pose: Pose, calib: &CalibrationRecord, half_length: f64) -> Pose {
    let yaw_deg = pose.yaw_deg + calib.angle_offset;
    let (sin, cos) = yaw_deg.to_radians().sin_cos();
    Pose {
        x: calib.x_scale * pose.x + calib.x_offset + sin * half_length,
        y: calib.y_scale * pose.y + calib.y_offset + cos * half_length,
        yaw_deg,
    }
}

impl CalibrationRecord {
    /// Method form of [`transform`].
    #[inline]
    pub fn apply(&self, pose: Pose, half_length: f64) -> Pose {
        transform(pose, self, half_length)
    }
}
