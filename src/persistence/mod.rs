//! Storage boundary for simulation checkpoints.
//!
//! The engine does not own a storage backend. It talks to one through the
//! [`GridStore`] trait, keyed by an opaque [`GridId`], and runs every store
//! call as a Stillwater effect whose environment is the store itself.

mod autosave;
mod memory;

pub use autosave::{fetch, save, AutosavePolicy, SaveAction};
pub use memory::InMemoryStore;

use crate::checkpoint::{Checkpoint, CheckpointError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Opaque identifier of a stored grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridId(Uuid);

impl GridId {
    /// Fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for GridId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for GridId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Errors reported by a [`GridStore`]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No stored grid with id {0}")]
    NotFound(GridId),

    #[error("Stored checkpoint is unusable: {0}")]
    Checkpoint(#[from] CheckpointError),

    #[error("Storage backend failed: {0}")]
    Backend(String),
}

/// Persistence collaborator keyed by [`GridId`].
///
/// Implementations must be cheap to clone and safe to share, since a clone is
/// handed to every effect as its environment.
pub trait GridStore: Send + Sync {
    /// Store a new record and return its id.
    fn create(&self, checkpoint: &Checkpoint) -> Result<GridId, StoreError>;

    /// Overwrite an existing record.
    fn update(&self, id: GridId, checkpoint: &Checkpoint) -> Result<(), StoreError>;

    fn fetch(&self, id: GridId) -> Result<Checkpoint, StoreError>;
}
