mod integrator;

pub use integrator::{ground, physics_integrator_system, step};
