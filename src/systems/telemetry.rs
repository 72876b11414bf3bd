use bevy::prelude::*;

use crate::{
    components::{TelemetrySnapshot, VehicleState},
    resources::{
        LatestTelemetry, Outbound, PhysicsConfig, SimClock, TelemetryConfig, TelemetryOutbox,
    },
};

pub fn advance_clock_system(mut clock: ResMut<SimClock>, physics: Res<PhysicsConfig>) {
    clock.advance(physics.timestep);
}

/// Captures the end-of-tick snapshot and publishes it every
/// `interval_ticks` ticks.
pub fn telemetry_system(
    query: Query<&VehicleState>,
    clock: Res<SimClock>,
    config: Res<TelemetryConfig>,
    mut latest: ResMut<LatestTelemetry>,
    outbox: Option<Res<TelemetryOutbox>>,
) {
    let Ok(state) = query.get_single() else {
        return;
    };
    let snapshot = TelemetrySnapshot::capture(state, &clock);

    if let Some(outbox) = outbox {
        let interval = u64::from(config.interval_ticks.max(1));
        if clock.tick() % interval == 0 {
            outbox.publish(Outbound::Telemetry(snapshot.clone()));
        }
    }

    latest.0 = Some(snapshot);
}
