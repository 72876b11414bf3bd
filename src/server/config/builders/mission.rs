use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    resources::{MissionConfig, PatrolRoute},
    server::config::{builders::require_positive, errors::ConfigError},
};

#[derive(Default, Debug, Serialize, Clone, Deserialize)]
pub struct MissionConfigBuilder {
    pub default_takeoff_altitude: Option<f64>,
    pub takeoff_tolerance: Option<f64>,
    pub arrival_epsilon: Option<f64>,
    pub landing_epsilon: Option<f64>,
    pub patrol: Option<PatrolRoute>,
}

impl MissionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_takeoff_altitude(mut self, altitude: f64) -> Self {
        self.default_takeoff_altitude = Some(altitude);
        self
    }

    pub fn takeoff_tolerance(mut self, tolerance: f64) -> Self {
        self.takeoff_tolerance = Some(tolerance);
        self
    }

    pub fn arrival_epsilon(mut self, epsilon: f64) -> Self {
        self.arrival_epsilon = Some(epsilon);
        self
    }

    pub fn landing_epsilon(mut self, epsilon: f64) -> Self {
        self.landing_epsilon = Some(epsilon);
        self
    }

    pub fn patrol(mut self, route: PatrolRoute) -> Self {
        self.patrol = Some(route);
        self
    }

    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let mut builder = Self::new();

        if let Some(altitude) = value.get("default_takeoff_altitude").and_then(|v| v.as_f64()) {
            builder = builder.default_takeoff_altitude(altitude);
        }
        if let Some(tolerance) = value.get("takeoff_tolerance").and_then(|v| v.as_f64()) {
            builder = builder.takeoff_tolerance(tolerance);
        }
        if let Some(epsilon) = value.get("arrival_epsilon").and_then(|v| v.as_f64()) {
            builder = builder.arrival_epsilon(epsilon);
        }
        if let Some(epsilon) = value.get("landing_epsilon").and_then(|v| v.as_f64()) {
            builder = builder.landing_epsilon(epsilon);
        }
        if let Some(patrol) = value.get("patrol") {
            builder = builder.patrol(serde_json::from_value(patrol.clone())?);
        }

        Ok(builder)
    }

    pub fn build(self) -> Result<MissionConfig, ConfigError> {
        let defaults = MissionConfig::default();
        let config = MissionConfig {
            default_takeoff_altitude: self
                .default_takeoff_altitude
                .unwrap_or(defaults.default_takeoff_altitude),
            takeoff_tolerance: self.takeoff_tolerance.unwrap_or(defaults.takeoff_tolerance),
            arrival_epsilon: self.arrival_epsilon.unwrap_or(defaults.arrival_epsilon),
            landing_epsilon: self.landing_epsilon.unwrap_or(defaults.landing_epsilon),
            patrol: self.patrol.unwrap_or(defaults.patrol),
        };

        require_positive("default_takeoff_altitude", config.default_takeoff_altitude)?;
        require_positive("takeoff_tolerance", config.takeoff_tolerance)?;
        require_positive("arrival_epsilon", config.arrival_epsilon)?;
        require_positive("landing_epsilon", config.landing_epsilon)?;

        if config.patrol.waypoints.is_empty() {
            return Err(ConfigError::ValidationError(
                "patrol route needs at least one waypoint".to_string(),
            ));
        }
        if let Some(bad) = config
            .patrol
            .waypoints
            .iter()
            .find(|w| !w.iter().all(|c| c.is_finite()))
        {
            return Err(ConfigError::invalid(
                "patrol.waypoints",
                format!("[{}, {}]", bad.x, bad.y),
            ));
        }

        Ok(config)
    }
}
