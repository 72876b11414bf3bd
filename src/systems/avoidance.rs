use bevy::prelude::*;
use nalgebra::Vector2;

use crate::{
    components::{Guidance, Obstacle, Steering, VehicleState},
    resources::{AvoidanceConfig, ObstacleField, PhysicsConfig},
};

const DEGENERATE_DISTANCE: f64 = 1e-9;

/// Computes the horizontal steering correction for every vehicle.
///
/// Runs after guidance so the desired velocity of this tick is final, and
/// before the integrator which consumes `Steering`.
pub fn avoidance_system(
    mut query: Query<(&VehicleState, &mut Steering), With<Guidance>>,
    field: Res<ObstacleField>,
    avoidance: Res<AvoidanceConfig>,
    physics: Res<PhysicsConfig>,
) {
    for (state, mut steering) in query.iter_mut() {
        steering.correction = if state.mode().steers() {
            compute_correction(
                &state.horizontal_position(),
                &state.horizontal_velocity(),
                field.iter(),
                &avoidance,
                physics.max_speed,
                physics.timestep,
            )
        } else {
            Vector2::zeros()
        };
    }
}

/// Potential-field repulsion on the ground plane.
///
/// Every obstacle whose centre is closer than `radius + safe_distance` pushes
/// the vehicle outward with magnitude `gain / gap`, where `gap` is the
/// distance to the obstacle surface (floored at `min_gap`) and the push is
/// capped at `max_per_obstacle`. A sideways component in the direction of
/// travel lets the vehicle slide around an obstacle that sits exactly on its
/// path instead of stalling in front of it.
///
/// The sum is finally limited so that one tick of it cannot take the
/// horizontal speed beyond `max_speed`.
///
/// # Arguments
/// - `position`, `velocity`: horizontal state of the vehicle `(x, z)`.
/// - `obstacles`: current snapshot of the field.
/// - `dt`: tick length used for the speed limit; a non-positive value skips it.
pub fn compute_correction<'a>(
    position: &Vector2<f64>,
    velocity: &Vector2<f64>,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
    config: &AvoidanceConfig,
    max_speed: f64,
    dt: f64,
) -> Vector2<f64> {
    let mut correction = Vector2::zeros();

    for obstacle in obstacles {
        let offset = position - obstacle.center();
        let distance = offset.norm();
        if distance >= obstacle.radius() + config.safe_distance {
            continue;
        }

        let outward = if distance > DEGENERATE_DISTANCE {
            offset / distance
        } else {
            fallback_direction(velocity)
        };

        let gap = (distance - obstacle.radius()).max(config.min_gap);
        let magnitude = (config.gain / gap).min(config.max_per_obstacle);

        let mut sideways = Vector2::new(-outward.y, outward.x);
        if sideways.dot(velocity) < 0.0 {
            sideways = -sideways;
        }

        correction += magnitude * (outward + config.tangential_ratio * sideways);
    }

    limit_to_speed(correction, velocity, max_speed, dt)
}

/// Direction to push along when the vehicle sits on an obstacle's centre:
/// straight back the way it came, or along +x when at rest.
fn fallback_direction(velocity: &Vector2<f64>) -> Vector2<f64> {
    let speed = velocity.norm();
    if speed > DEGENERATE_DISTANCE {
        -*velocity / speed
    } else {
        Vector2::x()
    }
}

fn limit_to_speed(
    correction: Vector2<f64>,
    velocity: &Vector2<f64>,
    max_speed: f64,
    dt: f64,
) -> Vector2<f64> {
    if dt <= 0.0 || correction == Vector2::zeros() {
        return correction;
    }

    let predicted = velocity + correction * dt;
    let predicted_speed = predicted.norm();
    if predicted_speed <= max_speed {
        return correction;
    }

    (predicted * (max_speed / predicted_speed) - velocity) / dt
}
