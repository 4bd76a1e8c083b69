use cs_bridge::EgoState;
use cs_core::{Pose, Tick};

/// What happened during one tick.  Handed to
/// [`SyncObserver::on_tick_end`][crate::SyncObserver::on_tick_end].
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub tick:              Tick,
    /// Sim-A frame number of the snapshot this tick consumed.
    pub frame:             u64,
    /// Sim-A game clock of that snapshot.
    pub game_timestamp_ms: u64,
    pub ego:               EgoState,
    /// The ego pose as sent to Sim-B.
    pub ego_pose_b:        Pose,
    /// Every non-ego agent in the snapshot, vehicles or not.
    pub agents_observed:   usize,
    pub vehicles_observed: usize,
    /// Registry occupancy after this tick.
    pub mirrored_total:    usize,
    pub spawned:           usize,
    pub moved:             usize,
    /// Vehicles left alone: the registry was already full, or the key
    /// collides with the ego entity.
    pub skipped:           usize,
    /// Entity-scoped move failures, ego included.
    pub move_failures:     usize,
}
