//! In-process [`GridStore`] implementation.

use super::{GridId, GridStore, StoreError};
use crate::checkpoint::Checkpoint;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared map of JSON-encoded checkpoints.
///
/// Clones share the same records. Checkpoints go through their JSON form on
/// the way in and out, so the store sees exactly what a remote backend would.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    records: Arc<Mutex<HashMap<GridId, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<GridId, String>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))
    }
}

impl GridStore for InMemoryStore {
    fn create(&self, checkpoint: &Checkpoint) -> Result<GridId, StoreError> {
        let id = GridId::new();
        let json = checkpoint.to_json()?;
        self.lock()?.insert(id, json);
        Ok(id)
    }

    fn update(&self, id: GridId, checkpoint: &Checkpoint) -> Result<(), StoreError> {
        let json = checkpoint.to_json()?;
        let mut records = self.lock()?;
        let record = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *record = json;
        Ok(())
    }

    fn fetch(&self, id: GridId) -> Result<Checkpoint, StoreError> {
        let records = self.lock()?;
        let json = records.get(&id).ok_or(StoreError::NotFound(id))?;
        Ok(Checkpoint::from_json(json)?)
    }
}
