use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    resources::PhysicsConfig,
    server::config::{builders::require_positive, errors::ConfigError},
};

#[derive(Default, Debug, Serialize, Clone, Deserialize)]
pub struct PhysicsConfigBuilder {
    pub timestep: Option<f64>,
    pub max_speed: Option<f64>,
    pub response_time: Option<f64>,
    pub drag_coefficient: Option<f64>,
    pub climb_rate: Option<f64>,
    pub descent_rate: Option<f64>,
}

impl PhysicsConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timestep(mut self, dt: f64) -> Self {
        self.timestep = Some(dt);
        self
    }

    pub fn max_speed(mut self, speed: f64) -> Self {
        self.max_speed = Some(speed);
        self
    }

    pub fn response_time(mut self, tau: f64) -> Self {
        self.response_time = Some(tau);
        self
    }

    pub fn drag_coefficient(mut self, drag: f64) -> Self {
        self.drag_coefficient = Some(drag);
        self
    }

    pub fn climb_rate(mut self, rate: f64) -> Self {
        self.climb_rate = Some(rate);
        self
    }

    pub fn descent_rate(mut self, rate: f64) -> Self {
        self.descent_rate = Some(rate);
        self
    }

    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let mut builder = Self::new();

        if let Some(timestep) = value.get("timestep").and_then(|v| v.as_f64()) {
            builder = builder.timestep(timestep);
        }
        if let Some(max_speed) = value.get("max_speed").and_then(|v| v.as_f64()) {
            builder = builder.max_speed(max_speed);
        }
        if let Some(response_time) = value.get("response_time").and_then(|v| v.as_f64()) {
            builder = builder.response_time(response_time);
        }
        if let Some(drag) = value.get("drag_coefficient").and_then(|v| v.as_f64()) {
            builder = builder.drag_coefficient(drag);
        }
        if let Some(climb_rate) = value.get("climb_rate").and_then(|v| v.as_f64()) {
            builder = builder.climb_rate(climb_rate);
        }
        if let Some(descent_rate) = value.get("descent_rate").and_then(|v| v.as_f64()) {
            builder = builder.descent_rate(descent_rate);
        }

        Ok(builder)
    }

    pub fn build(self) -> Result<PhysicsConfig, ConfigError> {
        let defaults = PhysicsConfig::default();
        let config = PhysicsConfig {
            timestep: self.timestep.unwrap_or(defaults.timestep),
            max_speed: self.max_speed.unwrap_or(defaults.max_speed),
            response_time: self.response_time.unwrap_or(defaults.response_time),
            drag_coefficient: self.drag_coefficient.unwrap_or(defaults.drag_coefficient),
            climb_rate: self.climb_rate.unwrap_or(defaults.climb_rate),
            descent_rate: self.descent_rate.unwrap_or(defaults.descent_rate),
        };

        require_positive("timestep", config.timestep)?;
        require_positive("max_speed", config.max_speed)?;
        require_positive("response_time", config.response_time)?;
        require_positive("climb_rate", config.climb_rate)?;
        require_positive("descent_rate", config.descent_rate)?;
        if !config.drag_coefficient.is_finite() || config.drag_coefficient < 0.0 {
            return Err(ConfigError::invalid(
                "drag_coefficient",
                config.drag_coefficient,
            ));
        }

        Ok(config)
    }
}
