use approx::assert_relative_eq;
use nalgebra::{Vector2, Vector3};
use pretty_assertions::assert_eq;
use skysim::{
    components::{MissionCommand, MissionMode},
    resources::{MissionConfig, PatrolFrame, PatrolRoute, PhysicsConfig},
};

use crate::common::{
    assert_grounded, assert_kinematics_valid, assert_within_speed_limit, hovering_app, take_off,
    TestAppBuilder, SETTLE_TICKS,
};

#[test]
fn test_takeoff_climbs_monotonically_to_hover() {
    let mut app = TestAppBuilder::new().build();
    let physics = PhysicsConfig::default();
    let tolerance = MissionConfig::default().takeoff_tolerance;

    app.command(MissionCommand::Takeoff {
        altitude: Some(10.0),
    });
    assert!(matches!(
        app.vehicle().mode(),
        MissionMode::TakingOff { target_altitude } if target_altitude == 10.0
    ));

    let mut previous = app.vehicle().altitude();
    let ticks = app
        .run_until(
            2_000,
            |state| state.mode() == MissionMode::Hovering,
            |state| {
                assert_kinematics_valid(state);
                assert_within_speed_limit(state, &physics);
                assert!(
                    state.altitude() >= previous,
                    "altitude dropped from {} to {}",
                    previous,
                    state.altitude()
                );
                previous = state.altitude();
            },
        )
        .expect("vehicle reaches hover");

    let state = app.vehicle();
    assert!((state.altitude() - 10.0).abs() < tolerance);
    assert_eq!(state.target_altitude(), None);
    // Roughly 10 m at the climb rate, plus the response lag.
    assert!(ticks < 600, "takeoff took {} ticks", ticks);
}

#[test]
fn test_takeoff_without_altitude_uses_default() {
    let mut app = TestAppBuilder::new().build();
    app.command(MissionCommand::Takeoff { altitude: None });

    assert_eq!(
        app.vehicle().target_altitude(),
        Some(MissionConfig::default().default_takeoff_altitude)
    );
}

#[test]
fn test_hover_holds_position() {
    let mut app = hovering_app(5.0);
    let start = app.vehicle().position();

    app.run_ticks(SETTLE_TICKS);

    let state = app.vehicle();
    assert_eq!(state.mode(), MissionMode::Hovering);
    assert!((state.position() - start).norm() < 1e-3);
}

#[test]
fn test_landing_terminates_in_bounded_time() {
    let mut app = hovering_app(10.0);
    let physics = PhysicsConfig::default();
    let altitude = app.vehicle().altitude();

    app.command(MissionCommand::Land);
    assert_eq!(app.vehicle().mode(), MissionMode::Landing);

    let bound = ((altitude / physics.descent_rate + 2.0) / physics.timestep) as usize;
    let ticks = app
        .run_until(
            bound,
            |state| state.mode() == MissionMode::Idle,
            assert_kinematics_valid,
        )
        .expect("landing completes");

    let state = app.vehicle();
    assert_grounded(&state);
    assert!(ticks > 0);
}

#[test]
fn test_move_reaches_target_and_hovers() {
    let mut app = hovering_app(5.0);
    let arrival = MissionConfig::default().arrival_epsilon;

    app.command(MissionCommand::Move {
        target: Vector2::new(-8.0, 6.0),
    });
    app.run_until_mode(2_000, MissionMode::Hovering)
        .expect("vehicle arrives");

    let state = app.vehicle();
    assert!((state.horizontal_position() - Vector2::new(-8.0, 6.0)).norm() < arrival);
    assert_eq!(state.target(), None);
    // Lateral moves never change altitude.
    assert_relative_eq!(state.velocity().y, 0.0, epsilon = 1e-3);
}

#[test]
fn test_hover_interrupts_move() {
    let mut app = hovering_app(5.0);
    app.command(MissionCommand::Move {
        target: Vector2::new(50.0, 0.0),
    });
    app.run_ticks(60);
    let altitude = app.vehicle().altitude();

    app.command(MissionCommand::Hover);
    app.run_ticks(SETTLE_TICKS * 2);

    let state = app.vehicle();
    assert_eq!(state.mode(), MissionMode::Hovering);
    assert_eq!(state.target(), None);
    assert!(state.velocity().norm() < 1e-2);
    assert_relative_eq!(state.altitude(), altitude, epsilon = 1e-2);
}

#[test]
fn test_patrol_loops_through_route() {
    let mut app = hovering_app(5.0);
    let anchor = app.vehicle().horizontal_position();

    app.command(MissionCommand::Patrol);
    assert_eq!(app.vehicle().mode(), MissionMode::Patrolling);
    assert_eq!(app.vehicle().target(), Some(anchor + Vector2::new(10.0, 0.0)));

    let mut visited = Vec::new();
    let mut last_index = 0;
    for _ in 0..3_000 {
        app.tick();
        let index = app.vehicle().patrol().map(|p| p.index()).unwrap_or_default();
        if index != last_index {
            visited.push(index);
            last_index = index;
        }
        if visited.len() >= 5 {
            break;
        }
    }

    assert_eq!(visited, vec![1, 2, 3, 0, 1]);
    assert_eq!(app.vehicle().mode(), MissionMode::Patrolling);
}

#[test]
fn test_rejected_command_leaves_state_untouched() {
    let mut app = TestAppBuilder::new()
        .with_start(Vector3::new(2.0, 0.0, -1.0))
        .build();
    let before = app.vehicle();

    app.command(MissionCommand::Move {
        target: Vector2::new(5.0, 5.0),
    });
    app.command(MissionCommand::Land);
    app.command(MissionCommand::Hover);

    let after = app.vehicle();
    assert_eq!(after.mode(), MissionMode::Idle);
    assert_eq!(after.target(), None);
    assert_eq!(after.position(), before.position());
    assert_eq!(app.rejections().len(), 3);
}

#[test]
fn test_mode_changes_are_reported() {
    let mut app = hovering_app(3.0);
    app.command(MissionCommand::Land);
    app.run_until_mode(2_000, MissionMode::Idle)
        .expect("landing completes");

    let modes: Vec<_> = app
        .mode_changes()
        .iter()
        .map(|event| event.to.label())
        .collect();
    assert_eq!(modes, vec!["taking_off", "hovering", "landing", "idle"]);
}

#[test]
fn test_absolute_patrol_route_at_coarse_timestep() {
    let mut app = TestAppBuilder::new()
        .with_physics(PhysicsConfig {
            timestep: 1.0 / 30.0,
            ..PhysicsConfig::default()
        })
        .with_mission(MissionConfig {
            patrol: PatrolRoute {
                frame: PatrolFrame::Absolute,
                waypoints: vec![Vector2::new(5.0, 0.0), Vector2::new(5.0, 5.0)],
            },
            ..MissionConfig::default()
        })
        .build();
    take_off(&mut app, 3.0);

    app.command(MissionCommand::Patrol);
    assert_eq!(app.vehicle().target(), Some(Vector2::new(5.0, 0.0)));

    app.run_until(
        1_000,
        |state| state.patrol().map(|p| p.index()) == Some(1),
        |_| {},
    )
    .expect("first waypoint reached");
    assert_eq!(app.vehicle().target(), Some(Vector2::new(5.0, 5.0)));
}

/// Time constant of the velocity decay once guidance commands zero.
fn decay_time(physics: &PhysicsConfig) -> f64 {
    physics.response_time / (1.0 + physics.drag_coefficient * physics.response_time)
}

#[test]
fn test_move_settles_past_target() {
    let physics = PhysicsConfig::default();
    let mut app = hovering_app(10.0);
    let target = Vector2::new(20.0, 0.0);

    app.command(MissionCommand::Move { target });
    app.run_until_mode(2_000, MissionMode::Hovering)
        .expect("vehicle arrives");
    let arrival = app.vehicle();
    let carried = arrival.velocity().x;
    assert!(carried > 0.0);

    app.run_ticks(SETTLE_TICKS);
    let state = app.vehicle();

    // Guidance is full speed up to the arrival disk, so the vehicle coasts on
    // and comes to rest beyond the target.
    let expected = arrival.position().x + carried * (decay_time(&physics) - physics.timestep);
    assert_relative_eq!(state.position().x, expected, epsilon = 1e-3);
    assert!(state.position().x > target.x);
    assert_eq!(state.mode(), MissionMode::Hovering);
    assert!(state.horizontal_velocity().norm() < 1e-3);
}

#[test]
fn test_takeoff_settles_above_target_altitude() {
    let physics = PhysicsConfig::default();
    let mut app = TestAppBuilder::new().build();

    app.command(MissionCommand::Takeoff {
        altitude: Some(10.0),
    });
    app.run_until_mode(2_000, MissionMode::Hovering)
        .expect("takeoff completes");
    let reached = app.vehicle();
    let carried = reached.velocity().y;
    assert!(carried > 0.0);

    app.run_ticks(SETTLE_TICKS);
    let state = app.vehicle();

    let expected = reached.altitude() + carried * (decay_time(&physics) - physics.timestep);
    assert_relative_eq!(state.altitude(), expected, epsilon = 1e-3);
    assert!(state.altitude() > 10.0);
    assert!(state.velocity().y.abs() < 1e-3);
}

#[test]
fn test_airborne_start_hovers_and_lands() {
    let mut app = TestAppBuilder::new()
        .with_start(Vector3::new(2.0, 8.0, -1.0))
        .build();

    let state = app.vehicle();
    assert_eq!(state.mode(), MissionMode::Hovering);
    assert_relative_eq!(state.altitude(), 8.0);

    app.command(MissionCommand::Land);
    assert_eq!(app.vehicle().mode(), MissionMode::Landing);
    app.run_until_mode(2_000, MissionMode::Idle)
        .expect("vehicle touches down");
    assert_grounded(&app.vehicle());
}

#[test]
fn test_start_below_landing_threshold_is_grounded() {
    let landing_epsilon = MissionConfig::default().landing_epsilon;
    let mut app = TestAppBuilder::new()
        .with_start(Vector3::new(1.0, landing_epsilon / 2.0, 2.0))
        .build();

    let state = app.vehicle();
    assert_eq!(state.mode(), MissionMode::Idle);
    assert_eq!(state.position(), Vector3::new(1.0, 0.0, 2.0));
}
