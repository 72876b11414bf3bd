use bevy::prelude::*;
use nalgebra::{Vector2, Vector3};

use crate::{
    components::{Guidance, Kinematics, Steering, VehicleState},
    errors::{SimError, SimResult},
    resources::PhysicsConfig,
};

/// System advancing every vehicle by one fixed timestep.
///
/// A step that fails (non-finite result or bad timestep) is discarded and the
/// vehicle keeps its previous state for this tick.
pub fn physics_integrator_system(
    mut query: Query<(&mut VehicleState, &Guidance, &Steering)>,
    physics: Res<PhysicsConfig>,
) {
    let dt = physics.timestep;

    for (mut state, guidance, steering) in query.iter_mut() {
        match step(
            &state,
            &guidance.desired_velocity,
            &steering.correction,
            dt,
            &physics,
        ) {
            Ok(kinematics) => state.set_kinematics(kinematics),
            Err(err) => error!("Rejected integration step, holding previous state: {}", err),
        }
    }
}

/// Explicit Euler step of the translational dynamics.
///
/// The vehicle tracks `desired_velocity` with a first-order lag of
/// `response_time`, the horizontal steering correction is added on top and
/// linear drag opposes the current velocity. Velocity is then bounded per
/// axis and the ground plane acts as a hard floor.
///
/// # Arguments
/// - `state`: vehicle before the step.
/// - `desired_velocity`: target velocity from mission guidance [m/s].
/// - `steering`: horizontal avoidance correction `(ax, az)` [m/s²].
/// - `dt`: timestep [s], must be positive.
/// - `physics`: flight parameters.
pub fn step(
    state: &VehicleState,
    desired_velocity: &Vector3<f64>,
    steering: &Vector2<f64>,
    dt: f64,
    physics: &PhysicsConfig,
) -> SimResult<Kinematics> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(SimError::InvalidTimestep(dt));
    }

    let velocity = state.velocity();
    let steering = Vector3::new(steering.x, 0.0, steering.y);
    let acceleration = (desired_velocity - velocity) / physics.response_time + steering
        - physics.drag_coefficient * velocity;

    let mut velocity = velocity + acceleration * dt;
    apply_velocity_limits(&mut velocity, physics.max_speed);

    let mut position = state.position() + velocity * dt;
    if position.y < 0.0 {
        position.y = 0.0;
        velocity.y = velocity.y.max(0.0);
    }

    let kinematics = Kinematics { position, velocity };
    if kinematics.is_finite() {
        Ok(kinematics)
    } else {
        Err(SimError::NumericInstability(format!(
            "position {:?}, velocity {:?}",
            position.as_slice(),
            velocity.as_slice()
        )))
    }
}

/// Touchdown: puts the vehicle on the ground plane and stops it.
pub fn ground(state: &mut VehicleState) {
    let mut position = state.position();
    position.y = 0.0;
    state.set_kinematics(Kinematics {
        position,
        velocity: Vector3::zeros(),
    });
}

/// Clamps each velocity component to `[-max_speed, max_speed]`.
fn apply_velocity_limits(velocity: &mut Vector3<f64>, max_speed: f64) {
    for component in velocity.iter_mut() {
        *component = component.clamp(-max_speed, max_speed);
    }
}
