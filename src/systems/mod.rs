mod avoidance;
mod collision;
mod ingest;
pub mod mission;
pub mod physics;
mod telemetry;

pub use avoidance::{avoidance_system, compute_correction};
pub use collision::{collision_system, detect_entries};
pub use ingest::{apply_obstacle_op, ingest_system, shutdown_on_disconnect_system};
pub use mission::{mission_guidance_system, mission_progress_system};
pub use physics::physics_integrator_system;
pub use telemetry::{advance_clock_system, telemetry_system};
