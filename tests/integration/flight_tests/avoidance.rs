use nalgebra::Vector2;
use pretty_assertions::assert_eq;
use skysim::{
    components::{MissionCommand, MissionMode, Steering},
    resources::{
        AvoidanceConfig, MissionConfig, ObstacleField, Outbound, PhysicsConfig, TelemetryConfig,
    },
};

use crate::common::{assert_kinematics_valid, assert_within_speed_limit, take_off, TestAppBuilder};

/// Flies from the origin to `target` past the configured obstacles and
/// returns the smallest clearance to any obstacle surface seen on the way.
fn fly_past(obstacles: &[(f64, f64, f64)], target: Vector2<f64>) -> f64 {
    let mut builder = TestAppBuilder::new().with_avoidance(AvoidanceConfig {
        safe_distance: 3.0,
        ..AvoidanceConfig::default()
    });
    for &(x, z, r) in obstacles {
        builder = builder.with_obstacle(x, z, r);
    }
    let mut app = builder.build();
    let physics = PhysicsConfig::default();
    take_off(&mut app, 10.0);

    app.command(MissionCommand::Move { target });

    let field = app
        .get_state::<ObstacleField>()
        .expect("obstacle field")
        .clone();
    let mut min_clearance = f64::INFINITY;
    app.run_until(
        3_000,
        |state| state.mode() == MissionMode::Hovering,
        |state| {
            assert_kinematics_valid(state);
            assert_within_speed_limit(state, &physics);
            for obstacle in field.iter() {
                min_clearance = min_clearance.min(obstacle.clearance(&state.horizontal_position()));
            }
        },
    )
    .expect("vehicle arrives");

    assert!(app.collisions().is_empty(), "collided: {:?}", app.collisions());

    let arrival = MissionConfig::default().arrival_epsilon;
    let state = app.vehicle();
    assert!(
        (state.horizontal_position() - target).norm() < arrival,
        "stopped at {:?}",
        state.horizontal_position()
    );
    min_clearance
}

#[test]
fn test_head_on_obstacle_is_avoided() {
    let clearance = fly_past(&[(10.0, 0.0, 2.0)], Vector2::new(20.0, 0.0));
    assert!(clearance >= 0.0, "entered obstacle, clearance {}", clearance);
}

#[test]
fn test_offset_obstacle_is_avoided() {
    let clearance = fly_past(&[(10.0, 0.5, 2.0)], Vector2::new(20.0, 0.0));
    assert!(clearance >= 0.0, "entered obstacle, clearance {}", clearance);
}

#[test]
fn test_obstacle_pair_is_avoided() {
    let clearance = fly_past(
        &[(10.0, -0.3, 2.0), (15.0, 3.0, 1.0)],
        Vector2::new(20.0, 0.0),
    );
    assert!(clearance >= 0.0, "entered obstacle, clearance {}", clearance);
}

#[test]
fn test_no_steering_while_idle() {
    let mut app = TestAppBuilder::new().with_obstacle(1.0, 0.0, 2.0).build();
    app.run_ticks(30);

    let steering = *app.query_single::<Steering>().expect("vehicle steering");
    assert_eq!(steering.correction, Vector2::zeros());
    assert_eq!(app.vehicle().horizontal_position(), Vector2::zeros());
}

#[test]
fn test_flying_through_obstacle_reports_one_collision() {
    let mut app = TestAppBuilder::new()
        .with_avoidance(AvoidanceConfig {
            gain: 0.0,
            tangential_ratio: 0.0,
            ..AvoidanceConfig::default()
        })
        .with_telemetry(TelemetryConfig {
            interval_ticks: 10_000,
            ..TelemetryConfig::default()
        })
        .with_obstacle(10.0, 0.0, 2.0)
        .build();
    take_off(&mut app, 10.0);
    assert!(app.collisions().is_empty());

    app.command(MissionCommand::Move {
        target: Vector2::new(20.0, 0.0),
    });
    app.run_until_mode(3_000, MissionMode::Hovering)
        .expect("vehicle arrives");

    let obstacle = app.get_state::<ObstacleField>().expect("obstacle field").snapshot()[0];
    let collisions = app.collisions();
    assert_eq!(collisions.len(), 1, "collisions: {:?}", collisions);
    assert_eq!(collisions[0].obstacle, obstacle.id());
    let entry_point = Vector2::new(collisions[0].position.x, collisions[0].position.z);
    assert!(obstacle.clearance(&entry_point) < 0.0);
    assert!(entry_point.x < obstacle.center().x, "entered at {:?}", entry_point);

    let reported: Vec<_> = app
        .outbound()
        .into_iter()
        .filter_map(|message| match message {
            Outbound::Collision {
                obstacle, position, ..
            } => Some((obstacle, position)),
            _ => None,
        })
        .collect();
    assert_eq!(reported, vec![(obstacle.entry(), collisions[0].position)]);
}
