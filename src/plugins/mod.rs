mod events;
mod mission;
mod physics;
mod simulation;
mod telemetry;

pub use events::{CollisionEvent, CommandRejectedEvent, ModeChangedEvent};
pub use mission::MissionPlugin;
pub use physics::PhysicsPlugin;
pub use simulation::{FlightSet, SimulationPlugin};
pub use telemetry::TelemetryPlugin;
