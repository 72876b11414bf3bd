mod config;
mod startup;
mod structures;

pub use config::{
    AvoidanceConfigBuilder, ConfigError, EnvConfig, EnvConfigBuilder, MissionConfigBuilder,
    PhysicsConfigBuilder, SimulationConfigBuilder, TelemetryConfigBuilder,
};
pub use startup::{connect, setup_app};
pub use structures::{CommandMessage, InboundMessage, TargetSpec};
