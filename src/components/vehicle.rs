use bevy::prelude::*;
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::components::{MissionMode, PatrolProgress};

/// Projects a world-space vector onto the ground plane `(x, z)`.
pub fn ground_plane(v: &Vector3<f64>) -> Vector2<f64> {
    Vector2::new(v.x, v.z)
}

/// Translational state of the vehicle. `y` is altitude above the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    /// Position in world space [m]
    pub position: Vector3<f64>,
    /// Linear velocity in world space [m/s]
    pub velocity: Vector3<f64>,
}

impl Kinematics {
    pub fn is_finite(&self) -> bool {
        self.position.iter().chain(self.velocity.iter()).all(|v| v.is_finite())
    }
}

/// The simulated vehicle.
///
/// Position and velocity are written by the flight dynamics integrator,
/// mode and targets by the mission state machine. Everything else only reads
/// it, through the getters or a `TelemetrySnapshot`.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub(crate) position: Vector3<f64>,
    pub(crate) velocity: Vector3<f64>,
    pub(crate) mode: MissionMode,
    pub(crate) target: Option<Vector2<f64>>,
    pub(crate) target_altitude: Option<f64>,
    pub(crate) patrol: Option<PatrolProgress>,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::at_rest(Vector3::zeros())
    }
}

impl VehicleState {
    /// A vehicle standing still in `Idle` mode. Negative altitudes are lifted
    /// onto the ground plane.
    pub fn at_rest(position: Vector3<f64>) -> Self {
        Self {
            position: Vector3::new(position.x, position.y.max(0.0), position.z),
            velocity: Vector3::zeros(),
            mode: MissionMode::Idle,
            target: None,
            target_altitude: None,
            patrol: None,
        }
    }

    /// A vehicle already holding position in the air.
    pub fn hovering_at(position: Vector3<f64>) -> Self {
        Self {
            mode: MissionMode::Hovering,
            ..Self::at_rest(position)
        }
    }

    /// Sets the initial velocity of a freshly created vehicle.
    pub fn with_velocity(mut self, velocity: Vector3<f64>) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn position(&self) -> Vector3<f64> {
        self.position
    }

    pub fn velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    pub fn altitude(&self) -> f64 {
        self.position.y
    }

    pub fn mode(&self) -> MissionMode {
        self.mode
    }

    pub fn target(&self) -> Option<Vector2<f64>> {
        self.target
    }

    pub fn target_altitude(&self) -> Option<f64> {
        self.target_altitude
    }

    pub fn patrol(&self) -> Option<&PatrolProgress> {
        self.patrol.as_ref()
    }

    pub fn horizontal_position(&self) -> Vector2<f64> {
        ground_plane(&self.position)
    }

    pub fn horizontal_velocity(&self) -> Vector2<f64> {
        ground_plane(&self.velocity)
    }

    pub fn kinematics(&self) -> Kinematics {
        Kinematics {
            position: self.position,
            velocity: self.velocity,
        }
    }

    pub(crate) fn set_kinematics(&mut self, kinematics: Kinematics) {
        self.position = kinematics.position;
        self.velocity = kinematics.velocity;
    }
}

/// Desired velocity derived by the mission state machine for the current tick.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Guidance {
    pub desired_velocity: Vector3<f64>,
}

/// Horizontal avoidance correction `(ax, az)` for the current tick [m/s²].
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Steering {
    pub correction: Vector2<f64>,
}
