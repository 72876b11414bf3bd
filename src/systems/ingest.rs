use bevy::prelude::*;

use crate::{
    components::{MissionCommand, Transition, VehicleState},
    errors::{SimError, SimResult},
    plugins::{CommandRejectedEvent, ModeChangedEvent},
    resources::{
        MissionConfig, ObstacleField, ObstacleOp, Outbound, SimInput, SimulationInbox,
        TelemetryOutbox,
    },
    systems::mission::apply_command,
};

/// Applies everything queued since the last tick, in arrival order.
///
/// Accepted commands are acknowledged and every change to the obstacle field
/// is echoed back as the full field, so a transport peer never has to track
/// ids itself. Rejections leave state untouched and are reported.
pub fn ingest_system(
    inbox: Option<ResMut<SimulationInbox>>,
    outbox: Option<Res<TelemetryOutbox>>,
    mut field: ResMut<ObstacleField>,
    mut vehicles: Query<(Entity, &mut VehicleState)>,
    mission: Res<MissionConfig>,
    mut mode_changes: EventWriter<ModeChangedEvent>,
    mut rejections: EventWriter<CommandRejectedEvent>,
) {
    let Some(mut inbox) = inbox else {
        return;
    };

    let publish = |message: Outbound| {
        if let Some(outbox) = outbox.as_ref() {
            outbox.publish(message);
        }
    };

    for input in inbox.drain() {
        let outcome = match input {
            SimInput::Command(command) => {
                apply_to_vehicle(&mut vehicles, command, &mission).map(|(entity, transition)| {
                    info!(
                        "Accepted '{}': {} -> {}",
                        command.action(),
                        transition.from,
                        transition.to
                    );
                    if transition.from != transition.to {
                        mode_changes.send(ModeChangedEvent::new(entity, transition));
                    }
                    publish(Outbound::Ack {
                        action: command.action().to_string(),
                        mode: transition.to.label().to_string(),
                    });
                })
            }
            SimInput::Obstacles(op) => apply_obstacle_op(&mut field, op).map(|()| {
                publish(Outbound::Obstacles {
                    obstacles: field.entries(),
                });
            }),
        };

        if let Err(reason) = outcome {
            warn!("Rejected input: {}", reason);
            publish(Outbound::Error {
                message: reason.to_string(),
            });
            rejections.send(CommandRejectedEvent { reason });
        }
    }
}

fn apply_to_vehicle(
    vehicles: &mut Query<(Entity, &mut VehicleState)>,
    command: MissionCommand,
    mission: &MissionConfig,
) -> SimResult<(Entity, Transition)> {
    let (entity, mut state) = vehicles
        .get_single_mut()
        .map_err(|_| SimError::InvalidCommand("no single vehicle to command".to_string()))?;
    apply_command(&mut state, command, mission).map(|transition| (entity, transition))
}

/// Applies one obstacle operation. The field is only touched when the whole
/// operation is valid.
pub fn apply_obstacle_op(field: &mut ObstacleField, op: ObstacleOp) -> SimResult<()> {
    match op {
        ObstacleOp::Add(spec) => {
            let id = field.add_spec(spec)?;
            debug!("Added obstacle {} at ({}, {}) r={}", id, spec.x, spec.z, spec.r);
        }
        ObstacleOp::Remove(id) => {
            if field.remove(id).is_none() {
                return Err(SimError::InvalidCommand(format!("unknown obstacle {}", id)));
            }
        }
        ObstacleOp::Clear => field.clear(),
        ObstacleOp::Load(specs) => {
            field.load(&specs)?;
            info!("Loaded {} obstacles", specs.len());
        }
    }
    Ok(())
}

/// Requests app exit once every transport handle has gone away.
pub fn shutdown_on_disconnect_system(
    inbox: Option<Res<SimulationInbox>>,
    mut exit: EventWriter<AppExit>,
) {
    if inbox.is_some_and(|inbox| inbox.is_closed()) {
        info!("Simulation link closed, shutting down");
        exit.send(AppExit::Success);
    }
}
