use serde::{Deserialize, Serialize};
use serde_json::Value;

mod avoidance;
mod mission;
mod physics;
mod simulation;
mod telemetry;

use crate::{
    components::ObstacleSpec,
    resources::ObstacleField,
    server::{config::errors::ConfigError, EnvConfig},
};

pub use avoidance::AvoidanceConfigBuilder;
pub use mission::MissionConfigBuilder;
pub use physics::PhysicsConfigBuilder;
pub use simulation::SimulationConfigBuilder;
pub use telemetry::TelemetryConfigBuilder;

/// Assembles an `EnvConfig` section by section. Missing sections and fields
/// fall back to their defaults; every section is validated on `build`.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct EnvConfigBuilder {
    pub simulation_builder: SimulationConfigBuilder,
    pub physics_builder: PhysicsConfigBuilder,
    pub avoidance_builder: AvoidanceConfigBuilder,
    pub mission_builder: MissionConfigBuilder,
    pub telemetry_builder: TelemetryConfigBuilder,
    pub obstacles: Vec<ObstacleSpec>,
}

impl EnvConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn simulation(mut self, builder: SimulationConfigBuilder) -> Self {
        self.simulation_builder = builder;
        self
    }

    pub fn physics(mut self, builder: PhysicsConfigBuilder) -> Self {
        self.physics_builder = builder;
        self
    }

    pub fn avoidance(mut self, builder: AvoidanceConfigBuilder) -> Self {
        self.avoidance_builder = builder;
        self
    }

    pub fn mission(mut self, builder: MissionConfigBuilder) -> Self {
        self.mission_builder = builder;
        self
    }

    pub fn telemetry(mut self, builder: TelemetryConfigBuilder) -> Self {
        self.telemetry_builder = builder;
        self
    }

    pub fn obstacles(mut self, obstacles: Vec<ObstacleSpec>) -> Self {
        self.obstacles = obstacles;
        self
    }

    pub fn from_json(json_value: &Value) -> Result<Self, ConfigError> {
        let mut builder = Self::new();

        if let Some(simulation) = json_value.get("simulation") {
            builder = builder.simulation(SimulationConfigBuilder::from_json(simulation)?);
        }
        if let Some(physics) = json_value.get("physics") {
            builder = builder.physics(PhysicsConfigBuilder::from_json(physics)?);
        }
        if let Some(avoidance) = json_value.get("avoidance") {
            builder = builder.avoidance(AvoidanceConfigBuilder::from_json(avoidance)?);
        }
        if let Some(mission) = json_value.get("mission") {
            builder = builder.mission(MissionConfigBuilder::from_json(mission)?);
        }
        if let Some(telemetry) = json_value.get("telemetry") {
            builder = builder.telemetry(TelemetryConfigBuilder::from_json(telemetry)?);
        }
        if let Some(obstacles) = json_value.get("obstacles") {
            builder = builder.obstacles(serde_json::from_value(obstacles.clone())?);
        }

        Ok(builder)
    }

    pub fn build(self) -> Result<EnvConfig, ConfigError> {
        // Same checks the live field applies to a bulk load.
        ObstacleField::new()
            .load(&self.obstacles)
            .map_err(|err| ConfigError::ValidationError(format!("obstacles: {}", err)))?;

        Ok(EnvConfig {
            simulation: self.simulation_builder.build()?,
            physics: self.physics_builder.build()?,
            avoidance: self.avoidance_builder.build()?,
            mission: self.mission_builder.build()?,
            telemetry: self.telemetry_builder.build()?,
            obstacles: self.obstacles,
        })
    }
}

pub(crate) fn require_positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, value))
    }
}

pub(crate) fn require_non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, value))
    }
}
