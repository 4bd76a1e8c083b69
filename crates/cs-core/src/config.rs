//! Session configuration.
//!
//! Loaded once from a JSON file by the application and handed, piece by
//! piece, to the session layer.  Every field has a default so an empty object
//! `{}` is a valid configuration for a local setup.

use std::io::Read;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, EntityId, Footprint, RunMode};

// ── Sub-records ───────────────────────────────────────────────────────────────

/// Rendering quality requested from Sim-A.  `Low` runs considerably faster.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    Low,
    #[default]
    Epic,
}

impl QualityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            QualityLevel::Low  => "Low",
            QualityLevel::Epic => "Epic",
        }
    }
}

/// The ego vehicle as it is materialized in Sim-B.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EgoConfig {
    pub entity_id: EntityId,
    pub length:    f64,
    pub width:     f64,
}

impl EgoConfig {
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.length, self.width)
    }

    /// The footprint must be positive and finite and the id non-empty.
    pub fn validate(&self) -> CoreResult<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !(ok(self.length) && ok(self.width)) {
            return Err(CoreError::Config(format!(
                "ego footprint must be positive and finite, got {}x{}",
                self.length, self.width
            )));
        }
        if self.entity_id.as_str().is_empty() {
            return Err(CoreError::Config("ego entity_id must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for EgoConfig {
    fn default() -> Self {
        Self {
            entity_id: EntityId::from(EntityId::EGO_DEFAULT),
            length:    4.679_999_828_34,
            width:     1.879_999_995,
        }
    }
}

/// Where and how new entities enter Sim-B.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    pub route_id:      String,
    pub type_id:       String,
    pub lane:          u32,
    pub start_offset:  f64,
    pub initial_speed: f64,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            route_id:      "platoon_route".to_owned(),
            type_id:       "vtypeauto".to_owned(),
            lane:          0,
            start_offset:  0.0,
            initial_speed: 25.0,
        }
    }
}

/// Sim-B GUI viewport settings applied once at start-up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub view_id: String,
    pub zoom:    f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { view_id: "View #0".to_owned(), zoom: 1000.0 }
    }
}

// ── SessionConfig ─────────────────────────────────────────────────────────────

/// Top-level bridge configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Sim-A gateway host.
    pub host: String,
    /// Sim-A gateway port.
    pub port: u16,

    /// Sim-B TraCI host.
    pub sumo_host: String,
    /// Sim-B TraCI port.
    pub sumo_port: u16,
    /// TCP connect attempts against Sim-B before giving up.
    pub sumo_connect_retries: u32,

    /// Pause between Sim-A connection attempts.
    pub retry_backoff_ms: u64,

    /// Maximum number of non-ego agents mirrored into Sim-B.  Also the number
    /// of vehicles requested from Sim-A.
    pub capacity: usize,

    pub run_mode: RunMode,

    /// Map whose calibration file is loaded.  `None` selects identity.
    pub map_name: Option<String>,
    pub maps_dir: PathBuf,

    pub quality_level: QualityLevel,

    /// Master RNG seed.
    pub seed: u64,

    pub ego:      EgoConfig,
    pub mirror:   MirrorConfig,
    pub viewport: ViewportConfig,

    /// Directory for per-tick CSV summaries.  `None` disables file output.
    pub output_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host:                 "localhost".to_owned(),
            port:                 2000,
            sumo_host:            "localhost".to_owned(),
            sumo_port:            8813,
            sumo_connect_retries: 10,
            retry_backoff_ms:     1000,
            capacity:             5,
            run_mode:             RunMode::default(),
            map_name:             Some("town03".to_owned()),
            maps_dir:             PathBuf::from("./maps"),
            quality_level:        QualityLevel::default(),
            seed:                 42,
            ego:                  EgoConfig::default(),
            mirror:               MirrorConfig::default(),
            viewport:             ViewportConfig::default(),
            output_dir:           None,
        }
    }
}

impl SessionConfig {
    /// Load from a JSON file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Like [`load`][Self::load] but accepts any `Read` source.
    pub fn from_reader<R: Read>(reader: R) -> CoreResult<Self> {
        let config: SessionConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the bridge cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        self.ego.validate()?;
        if self.mirror.route_id.is_empty() {
            return Err(CoreError::Config("mirror route_id must not be empty".into()));
        }
        Ok(())
    }

    pub fn retry_backoff(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.retry_backoff_ms)
    }

    /// Every address the Sim-A gateway host resolves to.
    pub fn sim_a_addrs(&self) -> CoreResult<Vec<SocketAddr>> {
        resolve(&self.host, self.port)
    }

    /// Every address the Sim-B TraCI host resolves to.
    pub fn sim_b_addrs(&self) -> CoreResult<Vec<SocketAddr>> {
        resolve(&self.sumo_host, self.sumo_port)
    }
}

/// All addresses in resolver order.  Connectors try each in turn, so a host
/// such as `localhost` that maps to both `::1` and `127.0.0.1` reaches a
/// server listening on either.
fn resolve(host: &str, port: u16) -> CoreResult<Vec<SocketAddr>> {
    let addrs: Vec<SocketAddr> = (host, port).to_socket_addrs()?.collect();
    if addrs.is_empty() {
        return Err(CoreError::Config(format!("{host}:{port} did not resolve to any address")));
    }
    Ok(addrs)
}
