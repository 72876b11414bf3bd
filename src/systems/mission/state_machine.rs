use nalgebra::{Vector2, Vector3};

use crate::{
    components::{MissionCommand, MissionMode, PatrolProgress, Transition, VehicleState},
    errors::{SimError, SimResult},
    resources::{MissionConfig, PhysicsConfig},
    systems::physics::ground,
};

const MIN_HEADING_DISTANCE: f64 = 1e-9;

/// Applies an operator command to the vehicle.
///
/// The command is validated against the current mode before anything is
/// written, so a rejected command leaves the state exactly as it was.
pub fn apply_command(
    state: &mut VehicleState,
    command: MissionCommand,
    config: &MissionConfig,
) -> SimResult<Transition> {
    let from = state.mode;

    match (from, command) {
        (MissionMode::Idle, MissionCommand::Takeoff { altitude }) => {
            let target_altitude = altitude.unwrap_or(config.default_takeoff_altitude);
            if !target_altitude.is_finite() || target_altitude <= 0.0 {
                return Err(SimError::InvalidCommand(format!(
                    "takeoff altitude must be positive, got {}",
                    target_altitude
                )));
            }
            state.mode = MissionMode::TakingOff { target_altitude };
            state.target_altitude = Some(target_altitude);
            state.target = None;
            state.patrol = None;
        }
        (_, MissionCommand::Takeoff { .. }) => {
            return Err(rejected(&command, from, "vehicle is already airborne"));
        }

        (MissionMode::Idle, MissionCommand::Land) => {
            return Err(rejected(&command, from, "vehicle is on the ground"));
        }
        (_, MissionCommand::Land) => {
            state.mode = MissionMode::Landing;
            clear_targets(state);
        }

        (MissionMode::Idle | MissionMode::Landing, _) => {
            return Err(rejected(&command, from, "vehicle is not under flight control"));
        }

        (_, MissionCommand::Hover) => {
            state.mode = MissionMode::Hovering;
            clear_targets(state);
        }
        (_, MissionCommand::Move { target }) => {
            if !target.x.is_finite() || !target.y.is_finite() {
                return Err(SimError::InvalidCommand(format!(
                    "move target ({}, {}) is not finite",
                    target.x, target.y
                )));
            }
            clear_targets(state);
            state.mode = MissionMode::MovingTo { target };
            state.target = Some(target);
        }
        (_, MissionCommand::Patrol) => {
            let route = config.patrol.resolve(state.horizontal_position());
            let progress = PatrolProgress::new(route).ok_or_else(|| {
                SimError::InvalidCommand("patrol route has no waypoints".to_string())
            })?;
            clear_targets(state);
            state.target = Some(progress.waypoint());
            state.patrol = Some(progress);
            state.mode = MissionMode::Patrolling;
        }
    }

    Ok(Transition {
        from,
        to: state.mode,
    })
}

/// Velocity the vehicle should be flying this tick, before avoidance.
pub fn desired_velocity(state: &VehicleState, physics: &PhysicsConfig, dt: f64) -> Vector3<f64> {
    match state.mode {
        MissionMode::Idle | MissionMode::Hovering => Vector3::zeros(),
        MissionMode::TakingOff { target_altitude } => {
            let remaining = target_altitude - state.altitude();
            let vertical = if dt > 0.0 {
                (remaining / dt).clamp(-physics.descent_rate, physics.climb_rate)
            } else {
                0.0
            };
            Vector3::new(0.0, vertical, 0.0)
        }
        MissionMode::Landing => {
            let vertical = if dt > 0.0 {
                (-state.altitude() / dt).max(-physics.descent_rate)
            } else {
                0.0
            };
            Vector3::new(0.0, vertical, 0.0)
        }
        MissionMode::MovingTo { .. } | MissionMode::Patrolling => match state.target {
            Some(target) => {
                let heading = heading_to(&state.horizontal_position(), &target) * physics.max_speed;
                Vector3::new(heading.x, 0.0, heading.y)
            }
            None => Vector3::zeros(),
        },
    }
}

/// Checks the progress conditions of the current mode after integration.
///
/// Returns the transition when the mode changed. Patrol waypoint advances
/// keep the mode and therefore return `None`.
pub fn advance(state: &mut VehicleState, config: &MissionConfig) -> Option<Transition> {
    let from = state.mode;

    match from {
        MissionMode::TakingOff { target_altitude } => {
            if (state.altitude() - target_altitude).abs() < config.takeoff_tolerance {
                state.mode = MissionMode::Hovering;
                state.target_altitude = None;
            }
        }
        MissionMode::Landing => {
            if state.altitude() <= config.landing_epsilon {
                ground(state);
                state.mode = MissionMode::Idle;
            }
        }
        MissionMode::MovingTo { target } => {
            if (state.horizontal_position() - target).norm() < config.arrival_epsilon {
                state.mode = MissionMode::Hovering;
                state.target = None;
            }
        }
        MissionMode::Patrolling => {
            let position = state.horizontal_position();
            if let Some(progress) = state.patrol.as_mut() {
                if (position - progress.waypoint()).norm() < config.arrival_epsilon {
                    state.target = Some(progress.advance());
                }
            }
        }
        MissionMode::Idle | MissionMode::Hovering => {}
    }

    (state.mode != from).then_some(Transition {
        from,
        to: state.mode,
    })
}

fn heading_to(position: &Vector2<f64>, target: &Vector2<f64>) -> Vector2<f64> {
    let offset = target - position;
    let distance = offset.norm();
    if distance < MIN_HEADING_DISTANCE {
        Vector2::zeros()
    } else {
        offset / distance
    }
}

fn clear_targets(state: &mut VehicleState) {
    state.target = None;
    state.target_altitude = None;
    state.patrol = None;
}

fn rejected(command: &MissionCommand, mode: MissionMode, reason: &str) -> SimError {
    SimError::InvalidCommand(format!(
        "'{}' not allowed while {}: {}",
        command.action(),
        mode.label(),
        reason
    ))
}
