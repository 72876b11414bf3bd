use bevy::prelude::*;
use nalgebra::Vector2;
use std::collections::BTreeMap;

use crate::{
    components::{Obstacle, ObstacleEntry, ObstacleId, ObstacleSpec},
    errors::{SimError, SimResult},
};

/// The set of static obstacles.
///
/// Ids are allocated monotonically and the map is ordered by id, so
/// `snapshot` always returns obstacles in insertion order. Mutations are
/// applied between ticks only.
#[derive(Resource, Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: BTreeMap<ObstacleId, Obstacle>,
    next_id: u64,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, center: Vector2<f64>, radius: f64) -> SimResult<ObstacleId> {
        validate(center, radius)?;
        let id = ObstacleId(self.next_id);
        self.next_id += 1;
        self.obstacles.insert(id, Obstacle::new(id, center, radius));
        Ok(id)
    }

    pub fn add_spec(&mut self, spec: ObstacleSpec) -> SimResult<ObstacleId> {
        self.add(spec.center(), spec.r)
    }

    pub fn remove(&mut self, id: ObstacleId) -> Option<Obstacle> {
        self.obstacles.remove(&id)
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Replaces the whole field with `specs`. Either every entry is accepted
    /// or the field is left as it was.
    pub fn load(&mut self, specs: &[ObstacleSpec]) -> SimResult<Vec<ObstacleId>> {
        for (index, spec) in specs.iter().enumerate() {
            validate(spec.center(), spec.r).map_err(|err| match err {
                SimError::InvalidGeometry(msg) => {
                    SimError::InvalidGeometry(format!("entry {}: {}", index, msg))
                }
                other => other,
            })?;
        }

        self.clear();
        Ok(specs
            .iter()
            .map(|spec| {
                let id = ObstacleId(self.next_id);
                self.next_id += 1;
                self.obstacles
                    .insert(id, Obstacle::new(id, spec.center(), spec.r));
                id
            })
            .collect())
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.values()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn snapshot(&self) -> Vec<Obstacle> {
        self.obstacles.values().copied().collect()
    }

    /// The `{x, z, r}` form accepted by `load`, in snapshot order.
    pub fn to_specs(&self) -> Vec<ObstacleSpec> {
        self.obstacles.values().map(Obstacle::spec).collect()
    }

    pub fn entries(&self) -> Vec<ObstacleEntry> {
        self.obstacles.values().map(Obstacle::entry).collect()
    }
}

fn validate(center: Vector2<f64>, radius: f64) -> SimResult<()> {
    if !center.x.is_finite() || !center.y.is_finite() {
        return Err(SimError::InvalidGeometry(format!(
            "centre ({}, {}) is not finite",
            center.x, center.y
        )));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(SimError::InvalidGeometry(format!(
            "radius must be positive, got {}",
            radius
        )));
    }
    Ok(())
}
