use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Publish a snapshot every n ticks
    pub interval_ticks: u32,
    /// Capacity of the outbound queue; snapshots are dropped when it is full
    pub outbound_capacity: usize,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            interval_ticks: 1,
            outbound_capacity: 256,
        }
    }
}
