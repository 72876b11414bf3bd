use serde_json::Value;
use std::path::Path;

use crate::{
    components::ObstacleSpec,
    resources::{AvoidanceConfig, MissionConfig, PhysicsConfig, SimulationConfig, TelemetryConfig},
};

mod builders;
mod errors;

pub use builders::*;
pub use errors::ConfigError;

/// Complete configuration of a simulation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    pub simulation: SimulationConfig,
    pub physics: PhysicsConfig,
    pub avoidance: AvoidanceConfig,
    pub mission: MissionConfig,
    pub telemetry: TelemetryConfig,
    /// Obstacles loaded before the first tick
    pub obstacles: Vec<ObstacleSpec>,
}

impl EnvConfig {
    pub fn from_json(json_value: &Value) -> Result<Self, ConfigError> {
        let builder = EnvConfigBuilder::from_json(json_value)?;
        builder.build()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_yaml::from_str(yaml)?;
        Self::from_json(&value)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}
