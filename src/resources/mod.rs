pub mod config;
mod link;
mod obstacles;
mod time;

pub use config::{
    avoidance::AvoidanceConfig,
    mission::{MissionConfig, PatrolFrame, PatrolRoute},
    physics::PhysicsConfig,
    simulation::SimulationConfig,
    telemetry::TelemetryConfig,
};
pub use link::{
    channel, LatestTelemetry, ObstacleOp, Outbound, SimInput, SimulationHandle, SimulationInbox,
    TelemetryOutbox,
};
pub use obstacles::ObstacleField;
pub use time::SimClock;
