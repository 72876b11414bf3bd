use bevy::prelude::*;
use nalgebra::Vector3;

use crate::{
    components::{Guidance, ObstacleContacts, Steering, VehicleState},
    resources::{LatestTelemetry, MissionConfig, ObstacleField, SimClock, SimulationConfig},
};

/// Per-tick stages, run in this order on `FixedUpdate`.
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum FlightSet {
    /// Queued commands and obstacle operations are applied.
    Ingest,
    /// Mission state produces the desired velocity.
    Guidance,
    /// Obstacle repulsion perturbs the horizontal component.
    Avoidance,
    /// Dynamics step and clock advance.
    Integration,
    /// Arrival, takeoff and touchdown checks on the new state.
    Progress,
    /// Snapshot leaves the core.
    Telemetry,
}

/// Shared state of a simulation: the vehicle, the obstacle field and the clock.
pub struct SimulationPlugin {
    pub config: SimulationConfig,
}

impl SimulationPlugin {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .init_resource::<ObstacleField>()
            .init_resource::<SimClock>()
            .init_resource::<LatestTelemetry>();

        app.configure_sets(
            FixedUpdate,
            (
                FlightSet::Ingest,
                FlightSet::Guidance,
                FlightSet::Avoidance,
                FlightSet::Integration,
                FlightSet::Progress,
                FlightSet::Telemetry,
            )
                .chain(),
        );

        app.add_systems(Startup, spawn_vehicle);
    }
}

/// Spawns the vehicle at the configured start. A start above the landing
/// threshold is airborne and begins hovering; anything lower is put on the
/// ground in `Idle`.
fn spawn_vehicle(
    mut commands: Commands,
    config: Res<SimulationConfig>,
    mission: Option<Res<MissionConfig>>,
) {
    let landing_epsilon = mission
        .map(|mission| mission.landing_epsilon)
        .unwrap_or_else(|| MissionConfig::default().landing_epsilon);

    let start = config.start_position;
    let state = if start.y > landing_epsilon {
        VehicleState::hovering_at(start)
    } else {
        VehicleState::at_rest(Vector3::new(start.x, 0.0, start.z))
    };
    info!(
        "Spawning vehicle at ({:.2}, {:.2}, {:.2}), mode {}",
        state.position().x,
        state.position().y,
        state.position().z,
        state.mode()
    );
    commands.spawn((
        state,
        Guidance::default(),
        Steering::default(),
        ObstacleContacts::default(),
        Name::new("vehicle"),
    ));
}
