use bevy::prelude::*;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    components::{MissionCommand, ObstacleId, ObstacleSpec},
    errors::{SimError, SimResult},
    resources::{ObstacleOp, SimInput},
};

/// One line received from a transport peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    Command(CommandMessage),
    /// Replace the whole obstacle field.
    Obstacles { obstacles: Vec<ObstacleSpec> },
    AddObstacle(ObstacleSpec),
    RemoveObstacle { id: u64 },
    ClearObstacles,
    /// Traffic meant for other peers on the relay (`telemetry`, `status`,
    /// `nl_command`, ...). Logged, never applied.
    #[serde(other)]
    Other,
}

/// `{type: "command", action, altitude?, target?: {x, z}, data?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandMessage {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetSpec>,
    /// Free-form note attached by the sender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub x: f64,
    pub z: f64,
}

impl From<TargetSpec> for Vector2<f64> {
    fn from(target: TargetSpec) -> Self {
        Vector2::new(target.x, target.z)
    }
}

impl TryFrom<CommandMessage> for MissionCommand {
    type Error = SimError;

    fn try_from(message: CommandMessage) -> SimResult<Self> {
        match message.action.as_str() {
            "takeoff" => Ok(MissionCommand::Takeoff {
                altitude: message.altitude,
            }),
            "land" => Ok(MissionCommand::Land),
            "hover" => Ok(MissionCommand::Hover),
            "patrol" => Ok(MissionCommand::Patrol),
            "move" => message
                .target
                .map(|target| MissionCommand::Move {
                    target: target.into(),
                })
                .ok_or_else(|| {
                    SimError::InvalidCommand("'move' requires a target {x, z}".to_string())
                }),
            other => Err(SimError::InvalidCommand(format!(
                "unknown action '{}'",
                other
            ))),
        }
    }
}

impl InboundMessage {
    /// Parses one JSON line. Malformed input is an `InvalidCommand`.
    pub fn parse(line: &str) -> SimResult<Self> {
        serde_json::from_str(line)
            .map_err(|err| SimError::InvalidCommand(format!("malformed message: {}", err)))
    }

    /// What the simulation should apply, if anything.
    pub fn into_input(self) -> SimResult<Option<SimInput>> {
        let input = match self {
            InboundMessage::Command(command) => {
                if let Some(note) = &command.data {
                    debug!("Command '{}' note: {}", command.action, note);
                }
                SimInput::Command(MissionCommand::try_from(command)?)
            }
            InboundMessage::Obstacles { obstacles } => {
                SimInput::Obstacles(ObstacleOp::Load(obstacles))
            }
            InboundMessage::AddObstacle(spec) => SimInput::Obstacles(ObstacleOp::Add(spec)),
            InboundMessage::RemoveObstacle { id } => {
                SimInput::Obstacles(ObstacleOp::Remove(ObstacleId(id)))
            }
            InboundMessage::ClearObstacles => SimInput::Obstacles(ObstacleOp::Clear),
            InboundMessage::Other => return Ok(None),
        };
        Ok(Some(input))
    }
}
