use bevy::prelude::*;

use crate::{
    plugins::{MissionPlugin, PhysicsPlugin, SimulationPlugin, TelemetryPlugin},
    resources::{channel, ObstacleField, SimulationHandle},
    server::{ConfigError, EnvConfig},
};

/// Adds the flight core to `app` with the obstacles from `config` preloaded.
pub fn setup_app(mut app: App, config: &EnvConfig) -> Result<App, ConfigError> {
    let mut field = ObstacleField::new();
    field
        .load(&config.obstacles)
        .map_err(|err| ConfigError::ValidationError(err.to_string()))?;
    info!("Loaded {} obstacles from configuration", field.len());
    app.insert_resource(field);

    app.add_plugins((
        SimulationPlugin::new(config.simulation.clone()),
        PhysicsPlugin::with_config(config.physics.clone(), config.avoidance.clone()),
        MissionPlugin::new(config.mission.clone()),
        TelemetryPlugin::new(config.telemetry.clone()),
    ));

    Ok(app)
}

/// Opens the command/telemetry link and installs its simulation side.
pub fn connect(app: &mut App, config: &EnvConfig) -> SimulationHandle {
    let (handle, inbox, outbox) = channel(
        config.simulation.queue_capacity,
        config.telemetry.outbound_capacity,
    );
    app.insert_resource(inbox).insert_resource(outbox);
    handle
}
