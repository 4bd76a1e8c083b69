//! Unit tests for cs-bridge.

#[cfg(test)]
mod snapshot {
    use approx::assert_relative_eq;

    use cs_core::AgentKey;

    use crate::{AgentKind, BoxExtent, WorldSnapshot};

    #[test]
    fn sparse_json_parses_with_defaults() {
        let json = r#"{
            "frame": 3,
            "ego": { "pose": { "x": 1.0, "y": 2.0, "yaw_deg": 90.0 } },
            "agents": [
                { "key": "12", "pose": { "x": 0.0, "y": 0.0, "yaw_deg": 0.0 },
                  "extent": { "x": 2.0, "y": 1.0 } },
                { "key": "13", "kind": "pedestrian",
                  "pose": { "x": 5.0, "y": 5.0, "yaw_deg": 0.0 } }
            ]
        }"#;
        let snap: WorldSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.frame, 3);
        assert_eq!(snap.game_timestamp_ms, 0);
        assert_relative_eq!(snap.ego.pose.yaw_deg, 90.0);
        assert_eq!(snap.agents[0].kind, AgentKind::Vehicle);
        assert_eq!(snap.agents[1].kind, AgentKind::Pedestrian);

        let vehicles: Vec<&AgentKey> = snap.vehicles().map(|a| &a.key).collect();
        assert_eq!(vehicles, [&AgentKey::from("12")]);
    }

    #[test]
    fn extent_footprint() {
        let fp = BoxExtent::new(2.0, 1.0).footprint();
        assert_relative_eq!(fp.length, 4.0);
        assert_relative_eq!(fp.width, 2.0);
    }
}

#[cfg(test)]
mod control {
    use crate::{Autopilot, ControlCommand, ControlDirective, ControlSource, Neutral, WorldSnapshot};

    #[test]
    fn clamped_limits_axes() {
        let cmd = ControlCommand { steer: -3.0, throttle: 2.0, brake: -1.0, ..Default::default() };
        let c = cmd.clamped();
        assert_eq!((c.steer, c.throttle, c.brake), (-1.0, 1.0, 0.0));
    }

    #[test]
    fn shipped_sources() {
        let snap = WorldSnapshot::default();
        assert_eq!(Autopilot.next_directive(&snap), ControlDirective::Autopilot);
        assert_eq!(
            Neutral.next_directive(&snap),
            ControlDirective::Manual(ControlCommand::default())
        );
    }

    #[test]
    fn closures_are_sources() {
        let mut calls = 0;
        let mut source = |_: &WorldSnapshot| {
            calls += 1;
            ControlDirective::Manual(ControlCommand { throttle: 0.5, ..Default::default() })
        };
        let d = source.next_directive(&WorldSnapshot::default());
        assert!(matches!(d, ControlDirective::Manual(c) if c.throttle == 0.5));
        drop(source);
        assert_eq!(calls, 1);
    }
}

#[cfg(test)]
mod errors {
    use std::io;

    use cs_core::EntityId;

    use crate::BridgeError;

    #[test]
    fn classification() {
        assert!(BridgeError::Transport(io::Error::from(io::ErrorKind::ConnectionRefused)).is_transport());
        assert!(BridgeError::Closed.is_transport());
        assert!(!BridgeError::Protocol("x".into()).is_transport());

        assert!(BridgeError::UnknownEntity(EntityId::from("a")).is_entity_scoped());
        assert!(BridgeError::EntityRejected { entity: "a".into(), message: "m".into() }.is_entity_scoped());
        assert!(!BridgeError::Closed.is_entity_scoped());
        assert!(!BridgeError::DuplicateEntity("a".into()).is_entity_scoped());
    }
}

#[cfg(test)]
mod gateway {
    use std::io::{BufRead, BufReader, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread::{self, JoinHandle};

    use cs_core::{Pose, SessionConfig, SessionRng};

    use crate::gateway::{ClientMessage, ServerMessage};
    use crate::{
        BridgeError, ControlCommand, ControlDirective, EgoState, EpisodeSettings,
        GatewayConnector, SimABridge, SimAConnector, WorldSnapshot,
    };

    fn write_msg(stream: &mut TcpStream, msg: &ServerMessage) {
        let mut line = serde_json::to_vec(msg).unwrap();
        line.push(b'\n');
        stream.write_all(&line).unwrap();
    }

    fn read_msg(reader: &mut BufReader<TcpStream>) -> Option<ClientMessage> {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap() == 0 {
            return None;
        }
        Some(serde_json::from_str(line.trim_end()).unwrap())
    }

    fn frame(n: u64) -> WorldSnapshot {
        WorldSnapshot {
            frame: n,
            ego: EgoState {
                pose:      Pose::new(n as f64, 0.0, 0.0),
                autopilot: ControlCommand { throttle: 0.7, steer: 0.1, ..Default::default() },
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Gateway that hands out `frames` frames and records every client
    /// message.  With `hang_up` it drops the connection after the last frame,
    /// otherwise it keeps reading until the client hangs up.
    fn spawn_gateway(
        frames: u64,
        hang_up: bool,
    ) -> (std::net::SocketAddr, JoinHandle<Vec<ClientMessage>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut seen = Vec::new();

            seen.push(read_msg(&mut reader).unwrap());
            write_msg(&mut stream, &ServerMessage::Scene { player_starts: 4 });
            seen.push(read_msg(&mut reader).unwrap());

            for n in 0..frames {
                write_msg(&mut stream, &ServerMessage::Measurements(frame(n)));
                match read_msg(&mut reader) {
                    Some(msg) => seen.push(msg),
                    None => return seen,
                }
            }
            if hang_up {
                return seen;
            }
            while let Some(msg) = read_msg(&mut reader) {
                seen.push(msg);
            }
            seen
        });
        (addr, handle)
    }

    fn settings() -> EpisodeSettings {
        EpisodeSettings::for_session(&SessionConfig { capacity: 3, ..Default::default() })
    }

    #[test]
    fn settings_follow_session() {
        let s = settings();
        assert_eq!(s.number_of_vehicles, 3);
        assert_eq!(s.number_of_pedestrians, 0);
        assert!(s.send_non_player_agents_info);
        assert!(!s.synchronous_mode);
        assert_eq!(s.quality_level, "Epic");
    }

    #[test]
    fn handshake_frames_and_control() {
        let (addr, server) = spawn_gateway(2, false);
        let mut connector = GatewayConnector::new(vec![addr], settings(), SessionRng::new(9));
        let mut client = connector.connect().unwrap();

        let f0 = client.step().unwrap();
        assert_eq!(f0.frame, 0);
        client.send_control(ControlDirective::Autopilot).unwrap();

        let f1 = client.step().unwrap();
        assert_eq!(f1.frame, 1);
        client
            .send_control(ControlDirective::Manual(ControlCommand { brake: 5.0, ..Default::default() }))
            .unwrap();

        client.close().unwrap();
        client.close().unwrap();

        let seen = server.join().unwrap();
        assert!(matches!(&seen[0], ClientMessage::LoadSettings { settings } if settings.number_of_vehicles == 3));
        assert!(matches!(seen[1], ClientMessage::StartEpisode { player_start } if player_start < 4));
        assert_eq!(
            seen[2],
            ClientMessage::Control { control: frame(0).ego.autopilot },
            "autopilot relays the frame's proposal"
        );
        assert!(matches!(seen[3], ClientMessage::Control { control } if control.brake == 1.0));
        assert_eq!(seen[4], ClientMessage::Close);
    }

    #[test]
    fn connect_skips_unreachable_addresses() {
        let dead = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let (addr, server) = spawn_gateway(1, false);
        let mut connector = GatewayConnector::new(vec![dead, addr], settings(), SessionRng::new(3));
        let mut client = connector.connect().unwrap();
        assert_eq!(client.step().unwrap().frame, 0);
        client.close().unwrap();
        server.join().unwrap();
    }

    #[test]
    fn eof_is_transport_failure() {
        let (addr, server) = spawn_gateway(1, true);
        let mut connector = GatewayConnector::new(vec![addr], settings(), SessionRng::new(1));
        let mut client = connector.connect().unwrap();

        client.step().unwrap();
        client.send_control(ControlDirective::Autopilot).unwrap();
        let err = client.step().unwrap_err();
        assert!(err.is_transport(), "got {err:?}");
        drop(client);
        server.join().unwrap();
    }

    #[test]
    fn gateway_error_is_protocol_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            read_msg(&mut reader);
            write_msg(&mut stream, &ServerMessage::Error { message: "no such map".into() });
        });

        let mut connector = GatewayConnector::new(vec![addr], settings(), SessionRng::new(1));
        let err = connector.connect().err().unwrap();
        assert!(matches!(err, BridgeError::Protocol(ref m) if m == "no such map"));
        server.join().unwrap();
    }

    #[test]
    fn refused_connection_is_transport_failure() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let mut connector = GatewayConnector::new(vec![addr], settings(), SessionRng::new(1));
        let err = connector.connect().err().unwrap();
        assert!(err.is_transport());
    }
}
