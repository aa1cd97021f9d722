//! When to persist, and the effects that do it.

use super::{GridId, GridStore, StoreError};
use crate::checkpoint::Checkpoint;
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;
use tracing::info;

/// What the driver should do with the current checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveAction {
    /// Nothing to persist
    Skip,
    /// First save of a session without an id
    Create,
    /// Periodic save of an already-stored grid
    Update(GridId),
}

/// Autosave cadence.
///
/// Step 0 is never saved. A session without an id is stored on its first
/// non-zero step. A stored session is updated every `every` steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutosavePolicy {
    pub every: u64,
}

impl AutosavePolicy {
    pub fn new(every: u64) -> Self {
        Self { every }
    }

    /// Pure decision for the given session id and step.
    pub fn decide(&self, session: Option<GridId>, step: u64) -> SaveAction {
        if step == 0 {
            return SaveAction::Skip;
        }
        match session {
            None => SaveAction::Create,
            Some(id) if step.checked_rem(self.every) == Some(0) => SaveAction::Update(id),
            Some(_) => SaveAction::Skip,
        }
    }
}

/// Effect carrying out `action` against the store.
///
/// Resolves to the id the checkpoint is stored under, or `None` when the
/// action was [`SaveAction::Skip`].
pub fn save<Env>(
    action: SaveAction,
    checkpoint: Checkpoint,
) -> BoxedEffect<Option<GridId>, StoreError, Env>
where
    Env: GridStore + Clone + Send + Sync + 'static,
{
    match action {
        SaveAction::Skip => pure(None).boxed(),
        SaveAction::Create => from_fn(move |store: &Env| -> Result<Option<GridId>, StoreError> {
            let id = store.create(&checkpoint)?;
            info!(%id, step = checkpoint.step, "stored new grid");
            Ok(Some(id))
        })
        .boxed(),
        SaveAction::Update(id) => from_fn(move |store: &Env| -> Result<Option<GridId>, StoreError> {
            store.update(id, &checkpoint)?;
            info!(%id, step = checkpoint.step, "updated stored grid");
            Ok(Some(id))
        })
        .boxed(),
    }
}

/// Effect fetching the checkpoint stored under `id`.
pub fn fetch<Env>(id: GridId) -> BoxedEffect<Checkpoint, StoreError, Env>
where
    Env: GridStore + Clone + Send + Sync + 'static,
{
    from_fn(move |store: &Env| store.fetch(id)).boxed()
}
