use bevy::prelude::*;
use nalgebra::Vector3;

use crate::{
    components::{MissionMode, ObstacleId, Transition},
    errors::SimError,
};

/// Sent whenever the mission state machine moves a vehicle to another mode,
/// whether by command or by reaching a progress condition.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ModeChangedEvent {
    pub entity: Entity,
    pub from: MissionMode,
    pub to: MissionMode,
}

impl ModeChangedEvent {
    pub fn new(entity: Entity, transition: Transition) -> Self {
        Self {
            entity,
            from: transition.from,
            to: transition.to,
        }
    }
}

/// A command or obstacle operation that was refused. State is unchanged.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct CommandRejectedEvent {
    pub reason: SimError,
}

/// The vehicle entered an obstacle's footprint this tick. Sent once per
/// entry; staying inside does not repeat it.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct CollisionEvent {
    pub entity: Entity,
    pub obstacle: ObstacleId,
    /// Vehicle position at the end of the tick [m]
    pub position: Vector3<f64>,
}
