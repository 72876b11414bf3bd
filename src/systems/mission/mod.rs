mod state_machine;

use bevy::prelude::*;

use crate::{
    components::{Guidance, MissionMode, VehicleState},
    plugins::ModeChangedEvent,
    resources::{MissionConfig, PhysicsConfig},
};

pub use state_machine::{advance, apply_command, desired_velocity};

/// Writes this tick's desired velocity for every vehicle.
pub fn mission_guidance_system(
    mut query: Query<(&VehicleState, &mut Guidance)>,
    physics: Res<PhysicsConfig>,
) {
    for (state, mut guidance) in query.iter_mut() {
        guidance.desired_velocity = desired_velocity(state, &physics, physics.timestep);
    }
}

/// Evaluates arrival, takeoff and touchdown conditions on the freshly
/// integrated state.
pub fn mission_progress_system(
    mut query: Query<(Entity, &mut VehicleState)>,
    mission: Res<MissionConfig>,
    mut mode_changes: EventWriter<ModeChangedEvent>,
) {
    for (entity, mut state) in query.iter_mut() {
        let waypoint = state.target();

        if let Some(transition) = advance(&mut state, &mission) {
            info!(
                "Vehicle {:?} mode {} -> {}",
                entity, transition.from, transition.to
            );
            mode_changes.send(ModeChangedEvent::new(entity, transition));
        } else if state.mode() == MissionMode::Patrolling && state.target() != waypoint {
            debug!(
                "Vehicle {:?} reached waypoint, next {:?}",
                entity,
                state.target().map(|t| [t.x, t.y])
            );
        }
    }
}
