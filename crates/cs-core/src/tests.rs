//! Unit tests for cs-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentKey, EntityId};

    #[test]
    fn mirror_entity_reuses_key_text() {
        let key = AgentKey::from(17u64);
        assert_eq!(key.as_str(), "17");
        assert_eq!(key.mirror_entity(), EntityId::from("17"));
    }

    #[test]
    fn display_is_bare_text() {
        assert_eq!(EntityId::from(EntityId::EGO_DEFAULT).to_string(), "p0");
    }

    #[test]
    fn serde_is_transparent() {
        let key: AgentKey = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(key, AgentKey::from("abc"));
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"abc\"");
    }
}

#[cfg(test)]
mod pose {
    use approx::assert_relative_eq;

    use crate::{Footprint, Pose};

    #[test]
    fn footprint_from_half_extents_doubles() {
        let fp = Footprint::from_half_extents(2.0, 1.0);
        assert_relative_eq!(fp.length, 4.0);
        assert_relative_eq!(fp.width, 2.0);
        assert_relative_eq!(fp.half_length(), 2.0);
    }

    #[test]
    fn display_rounds_to_decimetres() {
        assert_eq!(Pose::new(1.24, -3.0, 90.04).to_string(), "(1.2, -3.0) yaw 90.0");
    }
}

#[cfg(test)]
mod transform {
    use approx::assert_abs_diff_eq;

    use crate::{CalibrationRecord, Pose, transform};

    const EPS: f64 = 1e-9;

    fn assert_pose_eq(got: Pose, want: Pose) {
        assert_abs_diff_eq!(got.x, want.x, epsilon = EPS);
        assert_abs_diff_eq!(got.y, want.y, epsilon = EPS);
        assert_abs_diff_eq!(got.yaw_deg, want.yaw_deg, epsilon = EPS);
    }

    #[test]
    fn identity_with_zero_half_length() {
        let calib = CalibrationRecord::IDENTITY;
        for pose in [
            Pose::new(0.0, 0.0, 0.0),
            Pose::new(12.5, -340.25, 37.0),
            Pose::new(-1e4, 2e3, -179.9),
            Pose::new(5.0, 5.0, 270.0),
        ] {
            assert_pose_eq(transform(pose, &calib, 0.0), pose);
        }
    }

    #[test]
    fn zero_yaw_shifts_y_by_half_length() {
        let calib = CalibrationRecord::IDENTITY;
        let got = transform(Pose::new(10.0, 20.0, 0.0), &calib, 2.5);
        assert_pose_eq(got, Pose::new(10.0, 22.5, 0.0));
    }

    #[test]
    fn ninety_degrees_shifts_x() {
        let calib = CalibrationRecord::IDENTITY;
        let got = transform(Pose::new(10.0, 20.0, 90.0), &calib, 2.0);
        assert_pose_eq(got, Pose::new(12.0, 20.0, 90.0));
    }

    #[test]
    fn angle_offset_applies_before_anchor_shift() {
        let calib = CalibrationRecord { angle_offset: 180.0, ..CalibrationRecord::IDENTITY };
        let got = transform(Pose::new(0.0, 0.0, 0.0), &calib, 1.0);
        assert_pose_eq(got, Pose::new(0.0, -1.0, 180.0));
    }

    #[test]
    fn affine_part() {
        let calib = CalibrationRecord {
            x_scale:      2.0,
            x_offset:     -5.0,
            y_scale:      -1.0,
            y_offset:     100.0,
            angle_offset: 0.0,
        };
        let got = calib.apply(Pose::new(3.0, 4.0, 0.0), 0.0);
        assert_pose_eq(got, Pose::new(1.0, 96.0, 0.0));
    }
}

#[cfg(test)]
mod calibration {
    use std::io::Cursor;

    use approx::assert_relative_eq;

    use crate::{CalibrationRecord, calibration_from_reader, calibration_path, load_calibration};

    #[test]
    fn absent_fields_default_to_identity() {
        let calib = calibration_from_reader(Cursor::new(r#"{ "y_multiplier": -1.0 }"#)).unwrap();
        assert_relative_eq!(calib.y_scale, -1.0);
        assert_relative_eq!(calib.x_scale, 1.0);
        assert_relative_eq!(calib.x_offset, 0.0);
        assert_relative_eq!(calib.y_offset, 0.0);
        assert_relative_eq!(calib.angle_offset, 0.0);
    }

    #[test]
    fn empty_object_is_identity() {
        let calib = calibration_from_reader(Cursor::new("{}")).unwrap();
        assert!(calib.is_identity());
    }

    #[test]
    fn unknown_keys_ignored() {
        let calib = calibration_from_reader(Cursor::new(
            r#"{ "angle_correction": 90, "comment": "town03" }"#,
        ))
        .unwrap();
        assert_relative_eq!(calib.angle_offset, 90.0);
    }

    #[test]
    fn malformed_json_errors() {
        assert!(calibration_from_reader(Cursor::new("{ not json")).is_err());
    }

    #[test]
    fn no_map_is_identity() {
        let calib = load_calibration(std::path::Path::new("/nonexistent"), None).unwrap();
        assert_eq!(calib, CalibrationRecord::IDENTITY);
    }

    #[test]
    fn missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_calibration(dir.path(), Some("town99")).is_err());
    }

    #[test]
    fn loads_from_map_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = calibration_path(dir.path(), "town03");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{ "x_correction": 3.5, "y_correction": -2.0 }"#).unwrap();

        let calib = load_calibration(dir.path(), Some("town03")).unwrap();
        assert_relative_eq!(calib.x_offset, 3.5);
        assert_relative_eq!(calib.y_offset, -2.0);
        assert!(path.ends_with("town03/town03.conf.json"));
    }
}

#[cfg(test)]
mod time {
    use crate::{RunMode, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t.next(), Tick(11));
        assert_eq!(Tick::ZERO.next().to_string(), "T1");
    }

    #[test]
    fn bounded_runs_max_step_plus_one() {
        let mode = RunMode::Bounded { max_step: 2 };
        let ran = (0..).take_while(|&n| mode.should_continue(n)).count();
        assert_eq!(ran, 3);
    }

    #[test]
    fn demo_never_stops() {
        assert!(RunMode::Demo.should_continue(u64::MAX));
    }

    #[test]
    fn run_mode_json_forms() {
        let demo: RunMode = serde_json::from_str("\"demo\"").unwrap();
        assert_eq!(demo, RunMode::Demo);
        let bounded: RunMode = serde_json::from_str(r#"{ "bounded": { "max_step": 7 } }"#).unwrap();
        assert_eq!(bounded, RunMode::Bounded { max_step: 7 });
    }
}

#[cfg(test)]
mod config {
    use std::io::Cursor;

    use crate::{EgoConfig, EntityId, QualityLevel, RunMode, SessionConfig};

    #[test]
    fn empty_object_uses_defaults() {
        let cfg = SessionConfig::from_reader(Cursor::new("{}")).unwrap();
        assert_eq!(cfg, SessionConfig::default());
        assert_eq!(cfg.capacity, 5);
        assert_eq!(cfg.port, 2000);
        assert_eq!(cfg.sumo_port, 8813);
        assert_eq!(cfg.ego.entity_id, EntityId::from("p0"));
        assert_eq!(cfg.mirror.route_id, "platoon_route");
        assert_eq!(cfg.run_mode, RunMode::Demo, "runs until interrupted unless bounded");
    }

    #[test]
    fn partial_override() {
        let cfg = SessionConfig::from_reader(Cursor::new(
            r#"{ "capacity": 2, "run_mode": "demo", "quality_level": "low",
                 "mirror": { "initial_speed": 10.0 } }"#,
        ))
        .unwrap();
        assert_eq!(cfg.capacity, 2);
        assert_eq!(cfg.run_mode, RunMode::Demo);
        assert_eq!(cfg.quality_level, QualityLevel::Low);
        assert_eq!(cfg.mirror.initial_speed, 10.0);
        assert_eq!(cfg.mirror.type_id, "vtypeauto");
    }

    #[test]
    fn rejects_degenerate_ego() {
        let result = SessionConfig::from_reader(Cursor::new(r#"{ "ego": { "length": 0.0 } }"#));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_non_finite_ego() {
        let ego = EgoConfig { width: f64::INFINITY, ..Default::default() };
        assert!(ego.validate().is_err());
        let cfg = SessionConfig { ego, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn resolves_loopback() {
        let cfg = SessionConfig { host: "127.0.0.1".into(), port: 2345, ..Default::default() };
        let addrs = cfg.sim_a_addrs().unwrap();
        assert_eq!(addrs.len(), 1);
        assert_eq!(addrs[0].port(), 2345);
    }

    #[test]
    fn localhost_keeps_every_address() {
        let cfg = SessionConfig { sumo_host: "localhost".into(), ..Default::default() };
        let addrs = cfg.sim_b_addrs().unwrap();
        assert!(addrs.iter().all(|a| a.port() == 8813));
        assert!(
            addrs.iter().any(|a| a.ip().is_loopback() && a.is_ipv4()),
            "IPv4 loopback must not be dropped: {addrs:?}"
        );
    }
}

#[cfg(test)]
mod rng {
    use crate::SessionRng;

    #[test]
    fn deterministic_same_seed() {
        let mut a = SessionRng::new(7);
        let mut b = SessionRng::new(7);
        for _ in 0..50 {
            assert_eq!(a.color(), b.color());
        }
    }

    #[test]
    fn colors_are_opaque() {
        let mut rng = SessionRng::new(1);
        assert!((0..100).all(|_| rng.color().a == 255));
    }

    #[test]
    fn pick_index_bounds() {
        let mut rng = SessionRng::new(3);
        assert_eq!(rng.pick_index(0), None);
        for _ in 0..100 {
            assert!(rng.pick_index(4).unwrap() < 4);
        }
    }
}
