//! Plain data row types written by output backends.

use cs_sync::TickReport;

/// One row per completed tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:              u64,
    pub frame:             u64,
    pub game_timestamp_ms: u64,
    /// Ego pose as sent to Sim-B.
    pub ego_x:             f64,
    pub ego_y:             f64,
    pub ego_yaw:           f64,
    /// Ego forward speed in m/s, as reported by Sim-A.
    pub ego_speed:         f64,
    pub agents_observed:   u32,
    pub vehicles_observed: u32,
    pub mirrored_total:    u32,
    pub spawned:           u32,
    pub moved:             u32,
    pub skipped:           u32,
    pub move_failures:     u32,
}

impl TickSummaryRow {
    pub const HEADER: [&'static str; 14] = [
        "tick",
        "frame",
        "game_timestamp_ms",
        "ego_x",
        "ego_y",
        "ego_yaw",
        "ego_speed",
        "agents_observed",
        "vehicles_observed",
        "mirrored_total",
        "spawned",
        "moved",
        "skipped",
        "move_failures",
    ];

    pub fn from_report(report: &TickReport) -> Self {
        Self {
            tick:              report.tick.0,
            frame:             report.frame,
            game_timestamp_ms: report.game_timestamp_ms,
            ego_x:             report.ego_pose_b.x,
            ego_y:             report.ego_pose_b.y,
            ego_yaw:           report.ego_pose_b.yaw_deg,
            ego_speed:         report.ego.forward_speed,
            agents_observed:   report.agents_observed as u32,
            vehicles_observed: report.vehicles_observed as u32,
            mirrored_total:    report.mirrored_total as u32,
            spawned:           report.spawned as u32,
            moved:             report.moved as u32,
            skipped:           report.skipped as u32,
            move_failures:     report.move_failures as u32,
        }
    }
}
