pub mod avoidance;
pub mod mission;
pub mod physics;
pub mod simulation;
pub mod telemetry;

pub use avoidance::AvoidanceConfig;
pub use mission::{MissionConfig, PatrolFrame, PatrolRoute};
pub use physics::PhysicsConfig;
pub use simulation::SimulationConfig;
pub use telemetry::TelemetryConfig;
