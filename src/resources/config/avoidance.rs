use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Tuning for reactive obstacle repulsion.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvoidanceConfig {
    /// Margin beyond an obstacle's radius where repulsion starts [m]
    pub safe_distance: f64,
    /// Repulsion strength; magnitude is `gain / gap` [m²/s²]
    pub gain: f64,
    /// Cap on a single obstacle's contribution [m/s²]
    pub max_per_obstacle: f64,
    /// Smallest gap used in the `gain / gap` term [m]
    pub min_gap: f64,
    /// Sideways push as a fraction of the radial push
    pub tangential_ratio: f64,
}

impl Default for AvoidanceConfig {
    fn default() -> Self {
        Self {
            safe_distance: 3.0,
            gain: 8.0,
            max_per_obstacle: 30.0,
            min_gap: 0.05,
            tangential_ratio: 0.6,
        }
    }
}
