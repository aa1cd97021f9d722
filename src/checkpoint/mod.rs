//! Transport-neutral export of a simulation's `{ step, grid }`.
//!
//! A checkpoint is what an external persistence layer stores: the current
//! grid as a binary matrix plus the step counter, wrapped with a format
//! version, an id and a timestamp. History is deliberately not part of it;
//! restoring goes through the controller's `load` command.

use crate::core::{Command, Grid, SimulationState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a simulation's grid and step.
///
/// # Example
///
/// ```rust
/// use cellsim::checkpoint::Checkpoint;
/// use cellsim::core::SimulationState;
///
/// let state = SimulationState::new(2, 3).unwrap();
/// let checkpoint = Checkpoint::capture(&state);
///
/// let json = checkpoint.to_json().unwrap();
/// let restored = Checkpoint::from_json(&json).unwrap();
/// assert_eq!(restored, checkpoint);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Step counter at capture time
    pub step: u64,

    /// Grid at capture time
    pub grid: Grid,
}

impl Checkpoint {
    /// Capture the grid and step of `state`.
    pub fn capture(state: &SimulationState) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            step: state.step(),
            grid: state.grid().clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Compact binary encoding.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Reject checkpoints written by a newer format.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }

    /// The `load` command that restores this checkpoint.
    pub fn load_command(&self) -> Command {
        Command::Load {
            grid: self.grid.clone(),
            step: self.step,
        }
    }
}
