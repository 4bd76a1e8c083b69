//! Per-map calibration records.
//!
//! # File format
//!
//! Each map ships an optional `<maps_dir>/<map>/<map>.conf.json`.  Every field
//! is optional; an absent field keeps the identity value for its coefficient.
//!
//! ```json
//! {
//!   "x_multiplier":     1.0,
//!   "x_correction":     0.0,
//!   "y_multiplier":    -1.0,
//!   "y_correction":     0.0,
//!   "angle_correction": 90.0
//! }
//! ```
//!
//! Unknown keys are ignored so the same file can carry notes for other tools.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{CoreError, CoreResult};

// ── On-disk record ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CalibrationFile {
    x_multiplier:     Option<f64>,
    x_correction:     Option<f64>,
    y_multiplier:     Option<f64>,
    y_correction:     Option<f64>,
    angle_correction: Option<f64>,
}

// ── CalibrationRecord ─────────────────────────────────────────────────────────

/// Affine and rotation coefficients reconciling Sim-A's frame with Sim-B's.
///
/// Loaded once at startup and shared read-only for the rest of the session.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CalibrationRecord {
    pub x_scale:      f64,
    pub x_offset:     f64,
    pub y_scale:      f64,
    pub y_offset:     f64,
    /// Degrees added to every Sim-A heading.
    pub angle_offset: f64,
}

impl CalibrationRecord {
    /// Identity record: scale 1, all offsets 0.
    pub const IDENTITY: CalibrationRecord = CalibrationRecord {
        x_scale:      1.0,
        x_offset:     0.0,
        y_scale:      1.0,
        y_offset:     0.0,
        angle_offset: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for CalibrationRecord {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<CalibrationFile> for CalibrationRecord {
    fn from(f: CalibrationFile) -> Self {
        let id = Self::IDENTITY;
        Self {
            x_scale:      f.x_multiplier.unwrap_or(id.x_scale),
            x_offset:     f.x_correction.unwrap_or(id.x_offset),
            y_scale:      f.y_multiplier.unwrap_or(id.y_scale),
            y_offset:     f.y_correction.unwrap_or(id.y_offset),
            angle_offset: f.angle_correction.unwrap_or(id.angle_offset),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Path of the calibration file for `map_name` under `maps_dir`.
pub fn calibration_path(maps_dir: &Path, map_name: &str) -> PathBuf {
    maps_dir.join(map_name).join(format!("{map_name}.conf.json"))
}

/// Load the calibration record for `map_name`.
///
/// `None` means "no map selected" and yields [`CalibrationRecord::IDENTITY`].
/// A named map whose file is missing or malformed is an error: silently
/// falling back to identity would misplace every vehicle.
pub fn load_calibration(maps_dir: &Path, map_name: Option<&str>) -> CoreResult<CalibrationRecord> {
    let Some(map_name) = map_name else {
        return Ok(CalibrationRecord::IDENTITY);
    };
    let path = calibration_path(maps_dir, map_name);
    let file = std::fs::File::open(&path).map_err(|e| {
        CoreError::Config(format!("cannot open calibration {}: {e}", path.display()))
    })?;
    calibration_from_reader(file)
}

/// Like [`load_calibration`] but accepts any `Read` source.
pub fn calibration_from_reader<R: Read>(reader: R) -> CoreResult<CalibrationRecord> {
    let raw: CalibrationFile = serde_json::from_reader(reader)?;
    Ok(raw.into())
}
