use bevy::prelude::*;

use crate::{
    plugins::{CommandRejectedEvent, FlightSet, ModeChangedEvent},
    resources::MissionConfig,
    systems::{ingest_system, mission_guidance_system, mission_progress_system},
};

/// Command intake and the mission state machine.
#[derive(Default)]
pub struct MissionPlugin {
    pub config: MissionConfig,
}

impl MissionPlugin {
    pub fn new(config: MissionConfig) -> Self {
        Self { config }
    }
}

impl Plugin for MissionPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .add_event::<ModeChangedEvent>()
            .add_event::<CommandRejectedEvent>();

        app.add_systems(
            FixedUpdate,
            (
                ingest_system.in_set(FlightSet::Ingest),
                mission_guidance_system.in_set(FlightSet::Guidance),
                mission_progress_system.in_set(FlightSet::Progress),
            ),
        );
    }
}
