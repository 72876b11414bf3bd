use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// High-level behaviour the vehicle is currently executing.
///
/// Exactly one mode is active at a time. Only the mission state machine
/// (`systems::mission`) moves a vehicle between modes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MissionMode {
    /// On the ground, motors idle.
    Idle,
    /// Climbing vertically towards `target_altitude` [m].
    TakingOff { target_altitude: f64 },
    /// Holding position; velocity settles towards zero.
    Hovering,
    /// Flying to a point on the ground plane `(x, z)`.
    MovingTo { target: Vector2<f64> },
    /// Cycling through the configured patrol route.
    Patrolling,
    /// Descending until touchdown.
    Landing,
}

impl Default for MissionMode {
    fn default() -> Self {
        MissionMode::Idle
    }
}

impl MissionMode {
    pub fn label(&self) -> &'static str {
        match self {
            MissionMode::Idle => "idle",
            MissionMode::TakingOff { .. } => "taking_off",
            MissionMode::Hovering => "hovering",
            MissionMode::MovingTo { .. } => "moving_to",
            MissionMode::Patrolling => "patrolling",
            MissionMode::Landing => "landing",
        }
    }

    /// Whether the vehicle is under lateral mission control, i.e. obstacle
    /// avoidance may steer it.
    pub fn steers(&self) -> bool {
        !matches!(self, MissionMode::Idle | MissionMode::Landing)
    }

    /// Whether a manoeuvre is in progress (reported as `missionActive`).
    pub fn is_mission_active(&self) -> bool {
        matches!(
            self,
            MissionMode::TakingOff { .. }
                | MissionMode::MovingTo { .. }
                | MissionMode::Patrolling
                | MissionMode::Landing
        )
    }
}

impl fmt::Display for MissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissionMode::TakingOff { target_altitude } => {
                write!(f, "taking_off(altitude={:.2})", target_altitude)
            }
            MissionMode::MovingTo { target } => {
                write!(f, "moving_to(x={:.2}, z={:.2})", target.x, target.y)
            }
            other => f.write_str(other.label()),
        }
    }
}

/// Commands accepted by the mission state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MissionCommand {
    /// Climb to `altitude`, or the configured default when omitted.
    Takeoff { altitude: Option<f64> },
    Land,
    Hover,
    /// Fly to `(x, z)` on the ground plane.
    Move { target: Vector2<f64> },
    Patrol,
}

impl MissionCommand {
    pub fn action(&self) -> &'static str {
        match self {
            MissionCommand::Takeoff { .. } => "takeoff",
            MissionCommand::Land => "land",
            MissionCommand::Hover => "hover",
            MissionCommand::Move { .. } => "move",
            MissionCommand::Patrol => "patrol",
        }
    }
}

/// A single mode change, reported by the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: MissionMode,
    pub to: MissionMode,
}

/// Position along a resolved patrol route. The route is never empty and
/// `index` always points into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PatrolProgressRepr")]
pub struct PatrolProgress {
    route: Vec<Vector2<f64>>,
    index: usize,
}

#[derive(Deserialize)]
struct PatrolProgressRepr {
    route: Vec<Vector2<f64>>,
    index: usize,
}

impl TryFrom<PatrolProgressRepr> for PatrolProgress {
    type Error = String;

    fn try_from(repr: PatrolProgressRepr) -> Result<Self, Self::Error> {
        if repr.index >= repr.route.len() {
            return Err(format!(
                "patrol index {} outside route of {} waypoints",
                repr.index,
                repr.route.len()
            ));
        }
        Ok(Self {
            route: repr.route,
            index: repr.index,
        })
    }
}

impl PatrolProgress {
    /// Returns `None` for an empty route.
    pub fn new(route: Vec<Vector2<f64>>) -> Option<Self> {
        if route.is_empty() {
            None
        } else {
            Some(Self { route, index: 0 })
        }
    }

    pub fn waypoint(&self) -> Vector2<f64> {
        self.route[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn route(&self) -> &[Vector2<f64>] {
        &self.route
    }

    /// Moves on to the next waypoint, wrapping back to the first one so the
    /// loop never ends.
    pub fn advance(&mut self) -> Vector2<f64> {
        self.index = (self.index + 1) % self.route.len();
        self.waypoint()
    }
}
