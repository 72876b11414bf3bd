pub mod mission;
pub mod obstacle;
pub mod telemetry;
pub mod vehicle;

pub use mission::{MissionCommand, MissionMode, PatrolProgress, Transition};
pub use obstacle::{Obstacle, ObstacleContacts, ObstacleEntry, ObstacleId, ObstacleSpec};
pub use telemetry::TelemetrySnapshot;
pub use vehicle::{ground_plane, Guidance, Kinematics, Steering, VehicleState};
