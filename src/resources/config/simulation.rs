use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Where the vehicle is spawned, in `Idle` mode [m]
    pub start_position: Vector3<f64>,
    /// Capacity of the inbound command/obstacle queue
    pub queue_capacity: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_position: Vector3::zeros(),
            queue_capacity: 64,
        }
    }
}
