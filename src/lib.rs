pub mod components;
pub mod errors;
pub mod plugins;
pub mod resources;
pub mod server;
pub mod systems;

pub use errors::{SimError, SimResult};
