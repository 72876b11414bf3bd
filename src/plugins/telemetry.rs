use bevy::prelude::*;

use crate::{plugins::FlightSet, resources::TelemetryConfig, systems::telemetry_system};

#[derive(Default)]
pub struct TelemetryPlugin {
    pub config: TelemetryConfig,
}

impl TelemetryPlugin {
    pub fn new(config: TelemetryConfig) -> Self {
        Self { config }
    }
}

impl Plugin for TelemetryPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .add_systems(FixedUpdate, telemetry_system.in_set(FlightSet::Telemetry));
    }
}
