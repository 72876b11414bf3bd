use thiserror::Error;

/// Recoverable failures raised inside a simulation tick.
///
/// None of these unwind through the loop: a rejected command or obstacle
/// operation leaves state untouched and the next tick proceeds normally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Invalid obstacle geometry: {0}")]
    InvalidGeometry(String),

    #[error("Numeric instability: {0}")]
    NumericInstability(String),

    #[error("Invalid timestep: {0}")]
    InvalidTimestep(f64),
}

pub type SimResult<T> = std::result::Result<T, SimError>;
