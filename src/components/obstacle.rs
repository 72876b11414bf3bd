use bevy::prelude::*;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};

/// Identity of an obstacle within the field. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObstacleId(pub u64);

impl fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Static circular obstacle on the ground plane. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    id: ObstacleId,
    center: Vector2<f64>,
    radius: f64,
}

impl Obstacle {
    pub(crate) fn new(id: ObstacleId, center: Vector2<f64>, radius: f64) -> Self {
        Self { id, center, radius }
    }

    pub fn id(&self) -> ObstacleId {
        self.id
    }

    /// Centre `(x, z)` [m]
    pub fn center(&self) -> Vector2<f64> {
        self.center
    }

    /// Radius [m]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Horizontal distance from `point` to the obstacle's edge. Negative inside.
    pub fn clearance(&self, point: &Vector2<f64>) -> f64 {
        (point - self.center).norm() - self.radius
    }

    pub fn spec(&self) -> ObstacleSpec {
        ObstacleSpec {
            x: self.center.x,
            z: self.center.y,
            r: self.radius,
        }
    }

    pub fn entry(&self) -> ObstacleEntry {
        ObstacleEntry {
            id: self.id,
            x: self.center.x,
            z: self.center.y,
            r: self.radius,
        }
    }
}

/// Wire representation `{x, z, r}` exchanged with the transport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub x: f64,
    pub z: f64,
    pub r: f64,
}

impl ObstacleSpec {
    pub fn new(x: f64, z: f64, r: f64) -> Self {
        Self { x, z, r }
    }

    pub fn center(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.z)
    }
}

/// `{id, x, z, r}`, the shape published after the field changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleEntry {
    pub id: ObstacleId,
    pub x: f64,
    pub z: f64,
    pub r: f64,
}

/// Obstacles whose footprint currently contains the vehicle. Kept between
/// ticks so a collision is reported once, on entry.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct ObstacleContacts {
    pub(crate) inside: BTreeSet<ObstacleId>,
}

impl ObstacleContacts {
    pub fn contains(&self, id: ObstacleId) -> bool {
        self.inside.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.inside.is_empty()
    }
}
