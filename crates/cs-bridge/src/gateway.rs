//! Sim-A gateway client.
//!
//! Sim-A is reached through a gateway process that speaks newline-delimited
//! JSON over TCP.  Every line is one object tagged by `"type"`.
//!
//! ```text
//! client                                   gateway
//!   │ load_settings {settings}               │
//!   │ ─────────────────────────────────────▶ │
//!   │                    scene {player_starts}│
//!   │ ◀───────────────────────────────────── │
//!   │ start_episode {player_start}           │
//!   │ ─────────────────────────────────────▶ │
//!   │            measurements {…snapshot…}   │   ┐
//!   │ ◀───────────────────────────────────── │   │ once per tick
//!   │ control {control}                      │   │
//!   │ ─────────────────────────────────────▶ │   ┘
//!   │ close                                  │
//!   │ ─────────────────────────────────────▶ │
//! ```
//!
//! The gateway may answer any request with `error {message}`.

use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};

use serde::{Deserialize, Serialize};

use cs_core::{SessionConfig, SessionRng};

use crate::{
    BridgeError, BridgeResult, ControlCommand, ControlDirective, SimABridge, SimAConnector,
    WorldSnapshot,
};

// ── Episode settings ──────────────────────────────────────────────────────────

/// Episode parameters sent to Sim-A before the first frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSettings {
    pub synchronous_mode:            bool,
    pub send_non_player_agents_info: bool,
    /// Always equal to the bridge's mirror capacity.
    pub number_of_vehicles:          usize,
    pub number_of_pedestrians:       usize,
    pub weather_id:                  u32,
    pub quality_level:               String,
    pub seed:                        u64,
}

impl EpisodeSettings {
    pub fn for_session(config: &SessionConfig) -> Self {
        Self {
            synchronous_mode:            false,
            send_non_player_agents_info: true,
            number_of_vehicles:          config.capacity,
            number_of_pedestrians:       0,
            weather_id:                  1,
            quality_level:               config.quality_level.as_str().to_owned(),
            seed:                        config.seed,
        }
    }
}

// ── Wire messages ─────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ClientMessage {
    LoadSettings { settings: EpisodeSettings },
    StartEpisode { player_start: usize },
    Control { control: ControlCommand },
    Close,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ServerMessage {
    Scene { player_starts: usize },
    Measurements(WorldSnapshot),
    Error { message: String },
}

// ── Connector ─────────────────────────────────────────────────────────────────

/// Opens [`GatewayClient`] sessions against a fixed host.
///
/// Each attempt tries the resolved addresses in order and uses the first
/// that accepts.
pub struct GatewayConnector {
    addrs:    Vec<SocketAddr>,
    settings: EpisodeSettings,
    rng:      SessionRng,
}

impl GatewayConnector {
    pub fn new(addrs: Vec<SocketAddr>, settings: EpisodeSettings, rng: SessionRng) -> Self {
        Self { addrs, settings, rng }
    }
}

impl SimAConnector for GatewayConnector {
    type Bridge = GatewayClient;

    fn connect(&mut self) -> BridgeResult<GatewayClient> {
        let stream = TcpStream::connect(&self.addrs[..])?;
        stream.set_nodelay(true)?;
        tracing::info!(peer = ?stream.peer_addr().ok(), "Sim-A gateway connected");

        let mut client = GatewayClient::from_stream(stream)?;
        client.send(&ClientMessage::LoadSettings { settings: self.settings.clone() })?;

        let player_starts = match client.recv()? {
            ServerMessage::Scene { player_starts } => player_starts,
            other => {
                return Err(BridgeError::Protocol(format!(
                    "expected scene description, got {other:?}"
                )));
            }
        };
        let player_start = self.rng.pick_index(player_starts).ok_or_else(|| {
            BridgeError::Protocol("scene offers no player start".into())
        })?;

        tracing::info!(player_start, player_starts, "starting new episode");
        client.send(&ClientMessage::StartEpisode { player_start })?;
        Ok(client)
    }
}

// ── Client ────────────────────────────────────────────────────────────────────

/// A live Sim-A session.
pub struct GatewayClient {
    stream:    TcpStream,
    reader:    BufReader<TcpStream>,
    line:      String,
    /// Autopilot proposal from the most recent frame.
    autopilot: Option<ControlCommand>,
    closed:    bool,
}

impl GatewayClient {
    fn from_stream(stream: TcpStream) -> BridgeResult<Self> {
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self {
            stream,
            reader,
            line:      String::new(),
            autopilot: None,
            closed:    false,
        })
    }

    fn send(&mut self, msg: &ClientMessage) -> BridgeResult<()> {
        if self.closed {
            return Err(BridgeError::Closed);
        }
        let mut buf = serde_json::to_vec(msg)?;
        buf.push(b'\n');
        self.stream.write_all(&buf)?;
        Ok(())
    }

    fn recv(&mut self) -> BridgeResult<ServerMessage> {
        if self.closed {
            return Err(BridgeError::Closed);
        }
        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            return Err(BridgeError::Closed);
        }
        match serde_json::from_str(self.line.trim_end())? {
            ServerMessage::Error { message } => Err(BridgeError::Protocol(message)),
            msg => Ok(msg),
        }
    }
}

impl SimABridge for GatewayClient {
    fn step(&mut self) -> BridgeResult<WorldSnapshot> {
        match self.recv()? {
            ServerMessage::Measurements(snapshot) => {
                self.autopilot = Some(snapshot.ego.autopilot);
                Ok(snapshot)
            }
            other => Err(BridgeError::Protocol(format!("expected measurements, got {other:?}"))),
        }
    }

    fn send_control(&mut self, directive: ControlDirective) -> BridgeResult<()> {
        let control = match directive {
            ControlDirective::Manual(cmd) => cmd.clamped(),
            ControlDirective::Autopilot => self.autopilot.ok_or_else(|| {
                BridgeError::Protocol("autopilot requested before the first frame".into())
            })?,
        };
        self.send(&ClientMessage::Control { control })
    }

    fn close(&mut self) -> BridgeResult<()> {
        if self.closed {
            return Ok(());
        }
        let farewell = self.send(&ClientMessage::Close);
        self.closed = true;
        let shutdown = self.stream.shutdown(Shutdown::Both);
        farewell?;
        // The peer may already have hung up.
        match shutdown {
            Err(e) if e.kind() != std::io::ErrorKind::NotConnected => Err(e.into()),
            _ => Ok(()),
        }
    }
}
