use bevy::prelude::*;

/// Simulated time, advanced once per tick.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    tick: u64,
    elapsed: f64,
}

impl SimClock {
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed += dt;
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds since start
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
