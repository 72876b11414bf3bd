use bevy::prelude::*;

use crate::{
    plugins::{CollisionEvent, FlightSet},
    resources::{AvoidanceConfig, PhysicsConfig},
    systems::{
        advance_clock_system, avoidance_system, collision_system, physics_integrator_system,
    },
};

/// Flight dynamics, reactive avoidance and collision reporting.
pub struct PhysicsPlugin {
    pub physics: PhysicsConfig,
    pub avoidance: AvoidanceConfig,
}

impl PhysicsPlugin {
    pub fn with_config(physics: PhysicsConfig, avoidance: AvoidanceConfig) -> Self {
        Self { physics, avoidance }
    }
}

impl Default for PhysicsPlugin {
    fn default() -> Self {
        Self::with_config(PhysicsConfig::default(), AvoidanceConfig::default())
    }
}

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.physics.clone())
            .insert_resource(self.avoidance.clone())
            .add_event::<CollisionEvent>();

        // Configure fixed timestep
        app.insert_resource(Time::<Fixed>::from_seconds(self.physics.timestep));

        app.add_systems(
            FixedUpdate,
            (
                avoidance_system.in_set(FlightSet::Avoidance),
                (
                    physics_integrator_system,
                    advance_clock_system,
                    collision_system,
                )
                    .chain()
                    .in_set(FlightSet::Integration),
            ),
        );
    }
}
