use approx::assert_relative_eq;
use skysim::{components::VehicleState, resources::PhysicsConfig};

/// Assert that position and velocity are finite and above ground
#[track_caller]
pub fn assert_kinematics_valid(state: &VehicleState) {
    let kinematics = state.kinematics();
    assert!(
        kinematics.is_finite(),
        "Non-finite kinematics: {:?}",
        kinematics
    );
    assert!(
        state.altitude() >= 0.0,
        "Vehicle below ground: {}",
        state.altitude()
    );
}

/// Assert that every velocity component is within the configured bound
#[track_caller]
pub fn assert_within_speed_limit(state: &VehicleState, physics: &PhysicsConfig) {
    for (axis, component) in ["x", "y", "z"].iter().zip(state.velocity().iter()) {
        assert!(
            component.abs() <= physics.max_speed + 1e-12,
            "Velocity {} = {} exceeds {}",
            axis,
            component,
            physics.max_speed
        );
    }
}

/// Assert that the vehicle is at rest on the ground plane
#[track_caller]
pub fn assert_grounded(state: &VehicleState) {
    assert_relative_eq!(state.altitude(), 0.0);
    assert_relative_eq!(state.velocity().norm(), 0.0);
}
