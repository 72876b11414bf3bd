use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{resources::TelemetryConfig, server::config::errors::ConfigError};

#[derive(Default, Debug, Serialize, Clone, Deserialize)]
pub struct TelemetryConfigBuilder {
    pub interval_ticks: Option<u32>,
    pub outbound_capacity: Option<usize>,
}

impl TelemetryConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interval_ticks(mut self, ticks: u32) -> Self {
        self.interval_ticks = Some(ticks);
        self
    }

    pub fn outbound_capacity(mut self, capacity: usize) -> Self {
        self.outbound_capacity = Some(capacity);
        self
    }

    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let mut builder = Self::new();

        if let Some(ticks) = value.get("interval_ticks").and_then(|v| v.as_u64()) {
            let ticks =
                u32::try_from(ticks).map_err(|_| ConfigError::invalid("interval_ticks", ticks))?;
            builder = builder.interval_ticks(ticks);
        }
        if let Some(capacity) = value.get("outbound_capacity").and_then(|v| v.as_u64()) {
            builder = builder.outbound_capacity(capacity as usize);
        }

        Ok(builder)
    }

    pub fn build(self) -> Result<TelemetryConfig, ConfigError> {
        let defaults = TelemetryConfig::default();
        let config = TelemetryConfig {
            interval_ticks: self.interval_ticks.unwrap_or(defaults.interval_ticks),
            outbound_capacity: self.outbound_capacity.unwrap_or(defaults.outbound_capacity),
        };

        if config.interval_ticks == 0 {
            return Err(ConfigError::invalid("interval_ticks", 0));
        }
        if config.outbound_capacity == 0 {
            return Err(ConfigError::invalid("outbound_capacity", 0));
        }

        Ok(config)
    }
}
