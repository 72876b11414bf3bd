use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{resources::SimulationConfig, server::config::errors::ConfigError};

#[derive(Default, Debug, Serialize, Clone, Deserialize)]
pub struct SimulationConfigBuilder {
    pub start_position: Option<Vector3<f64>>,
    pub queue_capacity: Option<usize>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_position(mut self, position: Vector3<f64>) -> Self {
        self.start_position = Some(position);
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }

    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let mut builder = Self::new();

        if let Some(position) = value.get("start_position") {
            builder = builder.start_position(serde_json::from_value(position.clone())?);
        }
        if let Some(capacity) = value.get("queue_capacity").and_then(|v| v.as_u64()) {
            builder = builder.queue_capacity(capacity as usize);
        }

        Ok(builder)
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let defaults = SimulationConfig::default();
        let config = SimulationConfig {
            start_position: self.start_position.unwrap_or(defaults.start_position),
            queue_capacity: self.queue_capacity.unwrap_or(defaults.queue_capacity),
        };

        let start = config.start_position;
        if !start.iter().all(|c| c.is_finite()) || start.y < 0.0 {
            return Err(ConfigError::invalid(
                "start_position",
                format!("[{}, {}, {}]", start.x, start.y, start.z),
            ));
        }
        if config.queue_capacity == 0 {
            return Err(ConfigError::invalid("queue_capacity", 0));
        }

        Ok(config)
    }
}
