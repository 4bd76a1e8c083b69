//! Ego control commands and the seam through which they are produced.

use serde::{Deserialize, Serialize};

use crate::WorldSnapshot;

/// Raw actuator command for the ego vehicle.
#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlCommand {
    /// `[-1, 1]`, negative steers left.
    pub steer:      f64,
    /// `[0, 1]`.
    pub throttle:   f64,
    /// `[0, 1]`.
    pub brake:      f64,
    pub hand_brake: bool,
    pub reverse:    bool,
}

impl ControlCommand {
    /// Clamp every axis into its valid range.
    pub fn clamped(self) -> Self {
        Self {
            steer:    self.steer.clamp(-1.0, 1.0),
            throttle: self.throttle.clamp(0.0, 1.0),
            brake:    self.brake.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// What the ego vehicle should do for the current tick.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum ControlDirective {
    Manual(ControlCommand),
    /// Apply the command Sim-A's autopilot proposed in the current snapshot.
    Autopilot,
}

/// Producer of per-tick control directives.
///
/// This is where a presentation shell (keyboard, joystick, scripted driver)
/// plugs in.  Closures `FnMut(&WorldSnapshot) -> ControlDirective` implement
/// it directly.
pub trait ControlSource {
    fn next_directive(&mut self, snapshot: &WorldSnapshot) -> ControlDirective;
}

impl<F> ControlSource for F
where
    F: FnMut(&WorldSnapshot) -> ControlDirective,
{
    fn next_directive(&mut self, snapshot: &WorldSnapshot) -> ControlDirective {
        self(snapshot)
    }
}

/// Always hands control to Sim-A's autopilot.
pub struct Autopilot;

impl ControlSource for Autopilot {
    fn next_directive(&mut self, _snapshot: &WorldSnapshot) -> ControlDirective {
        ControlDirective::Autopilot
    }
}

/// Zero throttle, zero steering.
pub struct Neutral;

impl ControlSource for Neutral {
    fn next_directive(&mut self, _snapshot: &WorldSnapshot) -> ControlDirective {
        ControlDirective::Manual(ControlCommand::default())
    }
}
