use bevy::prelude::*;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Thresholds and defaults used by the mission state machine.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    /// Used when `takeoff` carries no altitude [m]
    pub default_takeoff_altitude: f64,
    /// Altitude error at which takeoff completes [m]
    pub takeoff_tolerance: f64,
    /// Horizontal distance at which a target or waypoint counts as reached [m]
    pub arrival_epsilon: f64,
    /// Altitude at which landing completes [m]
    pub landing_epsilon: f64,
    pub patrol: PatrolRoute,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            default_takeoff_altitude: 10.0,
            takeoff_tolerance: 0.1,
            arrival_epsilon: 0.5,
            landing_epsilon: 0.05,
            patrol: PatrolRoute::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatrolFrame {
    /// Waypoints are world coordinates.
    Absolute,
    /// Waypoints are offsets from where the patrol started.
    RelativeToStart,
}

/// Closed loop of ground-plane waypoints `(x, z)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolRoute {
    pub frame: PatrolFrame,
    pub waypoints: Vec<Vector2<f64>>,
}

impl Default for PatrolRoute {
    /// A 10 m square that closes back on the starting point.
    fn default() -> Self {
        Self {
            frame: PatrolFrame::RelativeToStart,
            waypoints: vec![
                Vector2::new(10.0, 0.0),
                Vector2::new(10.0, 10.0),
                Vector2::new(0.0, 10.0),
                Vector2::new(0.0, 0.0),
            ],
        }
    }
}

impl PatrolRoute {
    /// World-space waypoints for a patrol that begins at `anchor`.
    pub fn resolve(&self, anchor: Vector2<f64>) -> Vec<Vector2<f64>> {
        match self.frame {
            PatrolFrame::Absolute => self.waypoints.clone(),
            PatrolFrame::RelativeToStart => {
                self.waypoints.iter().map(|offset| anchor + offset).collect()
            }
        }
    }
}
