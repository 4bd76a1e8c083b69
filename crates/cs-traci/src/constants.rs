//! TraCI protocol constants used by the bridge.
//!
//! Only the subset the bridge sends or parses is listed.

// ── Commands ──────────────────────────────────────────────────────────────────

pub const CMD_GETVERSION:       u8 = 0x00;
pub const CMD_SIMSTEP:          u8 = 0x02;
pub const CMD_CLOSE:            u8 = 0x7F;
pub const CMD_SET_VEHICLE:      u8 = 0xC4;
pub const CMD_SET_GUI:          u8 = 0xCC;

// ── Vehicle variables ─────────────────────────────────────────────────────────

pub const VAR_LENGTH:           u8 = 0x44;
pub const VAR_COLOR:            u8 = 0x45;
pub const VAR_WIDTH:            u8 = 0x4D;
pub const ADD_FULL:             u8 = 0x85;
pub const MOVE_TO_XY:           u8 = 0xB4;

// ── GUI variables ─────────────────────────────────────────────────────────────

pub const VAR_VIEW_ZOOM:        u8 = 0xA0;
pub const VAR_TRACK_VEHICLE:    u8 = 0xA6;

// ── Data types ────────────────────────────────────────────────────────────────

pub const TYPE_BYTE:            u8 = 0x08;
pub const TYPE_INTEGER:         u8 = 0x09;
pub const TYPE_DOUBLE:          u8 = 0x0B;
pub const TYPE_STRING:          u8 = 0x0C;
pub const TYPE_COMPOUND:        u8 = 0x0F;
pub const TYPE_COLOR:           u8 = 0x11;

// ── Status results ────────────────────────────────────────────────────────────

pub const RTYPE_OK:             u8 = 0x00;
pub const RTYPE_NOTIMPLEMENTED: u8 = 0x01;
pub const RTYPE_ERR:            u8 = 0xFF;

/// Keep-route mode for move-to-XY: ignore the route, map onto any edge.
pub const KEEP_ROUTE_FREE:      i8 = 2;

/// Human-readable name for log lines and error messages.
pub fn command_name(id: u8) -> &'static str {
    match id {
        CMD_GETVERSION  => "get version",
        CMD_SIMSTEP     => "simulation step",
        CMD_CLOSE       => "close",
        CMD_SET_VEHICLE => "set vehicle variable",
        CMD_SET_GUI     => "set GUI variable",
        _               => "command",
    }
}
