use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    resources::AvoidanceConfig,
    server::config::{
        builders::{require_non_negative, require_positive},
        errors::ConfigError,
    },
};

#[derive(Default, Debug, Serialize, Clone, Deserialize)]
pub struct AvoidanceConfigBuilder {
    pub safe_distance: Option<f64>,
    pub gain: Option<f64>,
    pub max_per_obstacle: Option<f64>,
    pub min_gap: Option<f64>,
    pub tangential_ratio: Option<f64>,
}

impl AvoidanceConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn safe_distance(mut self, distance: f64) -> Self {
        self.safe_distance = Some(distance);
        self
    }

    pub fn gain(mut self, gain: f64) -> Self {
        self.gain = Some(gain);
        self
    }

    pub fn max_per_obstacle(mut self, accel: f64) -> Self {
        self.max_per_obstacle = Some(accel);
        self
    }

    pub fn min_gap(mut self, gap: f64) -> Self {
        self.min_gap = Some(gap);
        self
    }

    pub fn tangential_ratio(mut self, ratio: f64) -> Self {
        self.tangential_ratio = Some(ratio);
        self
    }

    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let mut builder = Self::new();

        if let Some(safe_distance) = value.get("safe_distance").and_then(|v| v.as_f64()) {
            builder = builder.safe_distance(safe_distance);
        }
        if let Some(gain) = value.get("gain").and_then(|v| v.as_f64()) {
            builder = builder.gain(gain);
        }
        if let Some(max) = value.get("max_per_obstacle").and_then(|v| v.as_f64()) {
            builder = builder.max_per_obstacle(max);
        }
        if let Some(min_gap) = value.get("min_gap").and_then(|v| v.as_f64()) {
            builder = builder.min_gap(min_gap);
        }
        if let Some(ratio) = value.get("tangential_ratio").and_then(|v| v.as_f64()) {
            builder = builder.tangential_ratio(ratio);
        }

        Ok(builder)
    }

    pub fn build(self) -> Result<AvoidanceConfig, ConfigError> {
        let defaults = AvoidanceConfig::default();
        let config = AvoidanceConfig {
            safe_distance: self.safe_distance.unwrap_or(defaults.safe_distance),
            gain: self.gain.unwrap_or(defaults.gain),
            max_per_obstacle: self.max_per_obstacle.unwrap_or(defaults.max_per_obstacle),
            min_gap: self.min_gap.unwrap_or(defaults.min_gap),
            tangential_ratio: self.tangential_ratio.unwrap_or(defaults.tangential_ratio),
        };

        require_non_negative("safe_distance", config.safe_distance)?;
        require_non_negative("gain", config.gain)?;
        require_positive("max_per_obstacle", config.max_per_obstacle)?;
        require_positive("min_gap", config.min_gap)?;
        require_non_negative("tangential_ratio", config.tangential_ratio)?;

        Ok(config)
    }
}
