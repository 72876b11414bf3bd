use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::{components::VehicleState, resources::SimClock};

/// Read-only view of the vehicle handed to rendering and transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySnapshot {
    pub tick: u64,
    /// Simulated seconds since start
    pub time: f64,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub target: Option<Vector2<f64>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub target_altitude: Option<f64>,
    pub mission_active: bool,
}

impl TelemetrySnapshot {
    pub fn capture(state: &VehicleState, clock: &SimClock) -> Self {
        let mode = state.mode();
        Self {
            tick: clock.tick(),
            time: clock.elapsed(),
            position: state.position(),
            velocity: state.velocity(),
            mode: mode.label().to_string(),
            target: state.target(),
            target_altitude: state.target_altitude(),
            mission_active: mode.is_mission_active(),
        }
    }
}
