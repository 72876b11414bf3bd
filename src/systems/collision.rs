use bevy::prelude::*;
use nalgebra::Vector2;
use std::collections::BTreeSet;

use crate::{
    components::{Obstacle, ObstacleContacts, VehicleState},
    plugins::CollisionEvent,
    resources::{ObstacleField, Outbound, SimClock, TelemetryOutbox},
};

/// Reports every obstacle the vehicle entered during this tick.
///
/// Collisions are only detected, never resolved: the vehicle keeps flying
/// through the obstacle.
pub fn collision_system(
    mut query: Query<(Entity, &VehicleState, &mut ObstacleContacts)>,
    field: Res<ObstacleField>,
    clock: Res<SimClock>,
    outbox: Option<Res<TelemetryOutbox>>,
    mut collisions: EventWriter<CollisionEvent>,
) {
    for (entity, state, mut contacts) in query.iter_mut() {
        let position = state.position();

        for obstacle in detect_entries(&mut contacts, &state.horizontal_position(), field.iter()) {
            warn!(
                "Collision with obstacle {} at ({:.2}, {:.2}, {:.2})",
                obstacle.id(),
                position.x,
                position.y,
                position.z
            );
            collisions.send(CollisionEvent {
                entity,
                obstacle: obstacle.id(),
                position,
            });
            if let Some(outbox) = outbox.as_ref() {
                outbox.publish(Outbound::Collision {
                    tick: clock.tick(),
                    obstacle: obstacle.entry(),
                    position,
                });
            }
        }
    }
}

/// Updates `contacts` to the obstacles strictly containing `point` and
/// returns those that were not already in it. Touching an edge is not a
/// collision.
pub fn detect_entries<'a>(
    contacts: &mut ObstacleContacts,
    point: &Vector2<f64>,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
) -> Vec<Obstacle> {
    let mut inside = BTreeSet::new();
    let mut entered = Vec::new();

    for obstacle in obstacles {
        if obstacle.clearance(point) < 0.0 {
            inside.insert(obstacle.id());
            if !contacts.contains(obstacle.id()) {
                entered.push(*obstacle);
            }
        }
    }

    contacts.inside = inside;
    entered
}
