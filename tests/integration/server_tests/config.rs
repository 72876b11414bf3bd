use approx::assert_relative_eq;
use bevy::prelude::{Fixed, Time};
use nalgebra::{Vector2, Vector3};
use pretty_assertions::assert_eq;
use skysim::{
    components::{MissionCommand, MissionMode, ObstacleSpec},
    resources::{ObstacleField, PatrolFrame},
    server::{ConfigError, EnvConfig},
};
use std::io::Write;

use crate::common::TestAppBuilder;

const YAML: &str = r#"
simulation:
  start_position: [1.0, 0.0, 2.0]
physics:
  timestep: 0.02
  max_speed: 6
avoidance:
  safe_distance: 2.5
mission:
  default_takeoff_altitude: 4
  patrol:
    frame: absolute
    waypoints:
      - [0.0, 0.0]
      - [5.0, 0.0]
telemetry:
  interval_ticks: 2
obstacles:
  - { x: 10.0, z: 0.0, r: 2.0 }
  - { x: -4.0, z: 6.0, r: 1.0 }
"#;

#[test]
fn test_yaml_file_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(YAML.as_bytes()).unwrap();

    let config = EnvConfig::from_yaml_file(file.path()).unwrap();

    assert_eq!(config.simulation.start_position, Vector3::new(1.0, 0.0, 2.0));
    assert_relative_eq!(config.physics.timestep, 0.02);
    assert_relative_eq!(config.physics.max_speed, 6.0);
    assert_relative_eq!(config.avoidance.safe_distance, 2.5);
    assert_relative_eq!(config.mission.default_takeoff_altitude, 4.0);
    assert_eq!(config.mission.patrol.frame, PatrolFrame::Absolute);
    assert_eq!(config.mission.patrol.waypoints[1], Vector2::new(5.0, 0.0));
    assert_eq!(config.telemetry.interval_ticks, 2);
    assert_eq!(
        config.obstacles,
        vec![
            ObstacleSpec::new(10.0, 0.0, 2.0),
            ObstacleSpec::new(-4.0, 6.0, 1.0)
        ]
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = EnvConfig::from_yaml_file(dir.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::IoError(_)));
}

#[test]
fn test_broken_yaml_is_yaml_error() {
    let err = EnvConfig::from_yaml_str("physics: [unclosed").unwrap_err();
    assert!(matches!(err, ConfigError::YamlError(_)));
}

#[test]
fn test_invalid_yaml_values_are_rejected() {
    let err = EnvConfig::from_yaml_str("physics:\n  max_speed: -2\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidParameter { .. }));

    let err = EnvConfig::from_yaml_str("obstacles:\n  - { x: 0, z: 0, r: 0 }\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
}

#[test]
fn test_app_uses_loaded_config() {
    let config = EnvConfig::from_yaml_str(YAML).unwrap();
    let mut app = TestAppBuilder::new().with_config(config).build();

    assert_eq!(
        app.get_state::<ObstacleField>()
            .map(ObstacleField::len),
        Some(2)
    );
    let state = app.vehicle();
    assert_eq!(state.position(), Vector3::new(1.0, 0.0, 2.0));
    assert_eq!(state.mode(), MissionMode::Idle);

    app.command(MissionCommand::Takeoff { altitude: None });
    assert_eq!(app.vehicle().target_altitude(), Some(4.0));
}

#[test]
fn test_fixed_timestep_follows_physics_config() {
    let config = EnvConfig::from_yaml_str(YAML).unwrap();
    let app = TestAppBuilder::new().with_config(config).build();

    let fixed = app.get_state::<Time<Fixed>>().expect("fixed time resource");
    assert_relative_eq!(fixed.timestep().as_secs_f64(), 0.02, epsilon = 1e-9);
}
