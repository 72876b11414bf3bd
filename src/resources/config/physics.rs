use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Flight dynamics parameters shared by guidance, avoidance and the integrator.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Fixed tick length [s]
    pub timestep: f64,
    /// Per-axis velocity bound [m/s]
    pub max_speed: f64,
    /// Time constant for tracking the desired velocity [s]
    pub response_time: f64,
    /// Linear drag [1/s]
    pub drag_coefficient: f64,
    /// Takeoff climb rate [m/s]
    pub climb_rate: f64,
    /// Landing descent rate [m/s]
    pub descent_rate: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 60.0,
            max_speed: 5.0,
            response_time: 0.5,
            drag_coefficient: 0.05,
            climb_rate: 2.0,
            descent_rate: 1.5,
        }
    }
}
