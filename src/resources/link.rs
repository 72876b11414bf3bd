use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender, TryRecvError, TrySendError};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::{MissionCommand, ObstacleEntry, ObstacleId, ObstacleSpec, TelemetrySnapshot};

/// Obstacle field mutation requested from outside the simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum ObstacleOp {
    Add(ObstacleSpec),
    Remove(ObstacleId),
    Clear,
    /// Replace the whole field.
    Load(Vec<ObstacleSpec>),
}

/// Everything that may enter the simulation between ticks, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum SimInput {
    Command(MissionCommand),
    Obstacles(ObstacleOp),
}

/// Messages leaving the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outbound {
    Telemetry(TelemetrySnapshot),
    Obstacles { obstacles: Vec<ObstacleEntry> },
    Ack { action: String, mode: String },
    Error { message: String },
    Collision {
        tick: u64,
        obstacle: ObstacleEntry,
        position: Vector3<f64>,
    },
}

/// Creates the bounded queues linking a transport to the simulation.
///
/// The handle stays with the transport; inbox and outbox are inserted into the
/// app as resources.
pub fn channel(
    inbound_capacity: usize,
    outbound_capacity: usize,
) -> (SimulationHandle, SimulationInbox, TelemetryOutbox) {
    let (input_tx, input_rx) = crossbeam_channel::bounded(inbound_capacity.max(1));
    let (output_tx, output_rx) = crossbeam_channel::bounded(outbound_capacity.max(1));

    let handle = SimulationHandle {
        inputs: input_tx,
        outbound: output_rx,
        replies: output_tx.clone(),
    };
    let inbox = SimulationInbox {
        inputs: input_rx,
        closed: false,
    };
    (handle, inbox, TelemetryOutbox { sender: output_tx })
}

/// Transport side of the link.
#[derive(Clone)]
pub struct SimulationHandle {
    inputs: Sender<SimInput>,
    outbound: Receiver<Outbound>,
    replies: Sender<Outbound>,
}

impl SimulationHandle {
    /// Queues an input for the next tick, blocking while the queue is full.
    /// Returns `false` once the simulation has gone away.
    pub fn submit(&self, input: SimInput) -> bool {
        self.inputs.send(input).is_ok()
    }

    pub fn send_command(&self, command: MissionCommand) -> bool {
        self.submit(SimInput::Command(command))
    }

    pub fn send_obstacles(&self, op: ObstacleOp) -> bool {
        self.submit(SimInput::Obstacles(op))
    }

    /// Reports a transport-level failure (e.g. unparseable message) on the
    /// outbound stream, so it is ordered with the simulation's own replies.
    /// Returns `false` if the reply was dropped.
    pub fn reject(&self, message: impl Into<String>) -> bool {
        match self.replies.try_send(Outbound::Error {
            message: message.into(),
        }) {
            Ok(()) => true,
            Err(TrySendError::Full(Outbound::Error { message })) => {
                debug!("Outbound queue full, dropping error reply: {}", message);
                false
            }
            Err(_) => false,
        }
    }

    pub fn outbound(&self) -> &Receiver<Outbound> {
        &self.outbound
    }

    /// Everything published so far, without blocking.
    pub fn drain(&self) -> Vec<Outbound> {
        self.outbound.try_iter().collect()
    }
}

/// Simulation side of the inbound queue.
#[derive(Resource)]
pub struct SimulationInbox {
    inputs: Receiver<SimInput>,
    closed: bool,
}

impl SimulationInbox {
    /// Takes every queued input, oldest first.
    pub fn drain(&mut self) -> Vec<SimInput> {
        let mut drained = Vec::new();
        loop {
            match self.inputs.try_recv() {
                Ok(input) => drained.push(input),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.closed = true;
                    break;
                }
            }
        }
        drained
    }

    /// Whether every handle has been dropped and the queue is empty.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Simulation side of the outbound queue. Publishing never blocks.
#[derive(Resource, Clone)]
pub struct TelemetryOutbox {
    sender: Sender<Outbound>,
}

impl TelemetryOutbox {
    /// Best-effort send. Returns `false` if the message was dropped.
    pub fn publish(&self, message: Outbound) -> bool {
        match self.sender.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                debug!("Outbound queue full, dropping message");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Most recent snapshot, for in-process readers.
#[derive(Resource, Debug, Clone, Default)]
pub struct LatestTelemetry(pub Option<TelemetrySnapshot>);
