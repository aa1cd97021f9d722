//! Imperative shell around the pure core.
//!
//! The [`Driver`] owns the single live [`SimulationState`], threads every
//! command through [`controller::dispatch`], persists through store effects,
//! and runs the cooperative auto-step loop. The liveness flag lives here, not
//! in the core.

mod handle;

pub use handle::RunHandle;

use crate::checkpoint::Checkpoint;
use crate::config::{ConfigError, SimulationConfig};
use crate::core::{controller, Command, HistoryLedger, Outcome, SimulationError, SimulationState};
use crate::persistence::{self, AutosavePolicy, GridId, GridStore, StoreError};
use std::time::Duration;
use stillwater::effect::Effect;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by the driver
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Owner of one simulation session.
///
/// `Env` is the persistence collaborator; every save and fetch runs as an
/// effect with the store as its environment.
pub struct Driver<Env: GridStore + Clone + Send + Sync + 'static> {
    state: SimulationState,
    session: Option<GridId>,
    policy: AutosavePolicy,
    running: RunHandle,
    store: Env,
}

impl<Env: GridStore + Clone + Send + Sync + 'static> Driver<Env> {
    /// Start a fresh, unsaved session.
    pub fn new(config: &SimulationConfig, store: Env) -> Result<Self, DriverError> {
        config.validate()?;
        Ok(Self {
            state: config.initial_state()?,
            session: None,
            policy: AutosavePolicy::new(config.autosave_every),
            running: RunHandle::new(),
            store,
        })
    }

    /// Resume the session stored under `id`.
    pub async fn open(
        config: &SimulationConfig,
        store: Env,
        id: GridId,
    ) -> Result<Self, DriverError> {
        let checkpoint = persistence::fetch(id).run(&store).await?;
        let mut driver = Self::new(config, store)?;
        driver.state = controller::dispatch(&driver.state, checkpoint.load_command())?.state;
        driver.session = Some(id);
        info!(%id, step = checkpoint.step, "opened stored grid");
        Ok(driver)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn history(&self) -> &HistoryLedger {
        self.state.history()
    }

    /// Id of the stored record, once the session has been saved.
    pub fn session(&self) -> Option<GridId> {
        self.session
    }

    /// Shared liveness flag. Clones control the same loop.
    pub fn handle(&self) -> RunHandle {
        self.running.clone()
    }

    /// Flip play/pause, returning whether the loop should now run.
    pub fn toggle_running(&self) -> bool {
        self.running.toggle()
    }

    /// Apply one command and autosave if it changed the grid or the step.
    ///
    /// The new state is committed before persisting, so a save failure is
    /// returned as an error but the command itself has already taken effect.
    pub async fn dispatch(&mut self, command: Command) -> Result<Outcome, DriverError> {
        let dispatched = controller::dispatch(&self.state, command)?;
        let changed = dispatched.state.step() != self.state.step()
            || dispatched.state.grid() != self.state.grid();
        self.state = dispatched.state;

        if changed {
            self.autosave().await?;
        }
        Ok(dispatched.outcome)
    }

    /// One auto-step tick.
    pub async fn tick(&mut self) -> Result<Outcome, DriverError> {
        self.dispatch(Command::StepIn).await
    }

    /// Run ticks while the handle says so, sleeping `interval_ms` between
    /// them. The interval is re-read every tick.
    ///
    /// The flag is checked before each tick, so pausing takes effect at the
    /// next tick boundary and never interrupts a tick in progress. A failed
    /// save pauses the loop and returns the error. Returns the number of
    /// ticks executed.
    pub async fn run(&mut self) -> Result<u64, DriverError> {
        info!(
            step = self.state.step(),
            interval_ms = self.state.interval_ms(),
            "auto-step started"
        );
        let mut ticks = 0;

        while self.running.is_running() {
            if let Err(err) = self.tick().await {
                self.running.pause();
                warn!(error = %err, step = self.state.step(), "auto-step stopped");
                return Err(err);
            }
            ticks += 1;
            tokio::time::sleep(Duration::from_millis(self.state.interval_ms())).await;
        }

        info!(ticks, step = self.state.step(), "auto-step paused");
        Ok(ticks)
    }

    /// Set the flag and run until paused.
    pub async fn play(&mut self) -> Result<u64, DriverError> {
        self.running.start();
        self.run().await
    }

    async fn autosave(&mut self) -> Result<(), DriverError> {
        let action = self.policy.decide(self.session, self.state.step());
        debug!(?action, step = self.state.step(), "autosave");

        let checkpoint = Checkpoint::capture(&self.state);
        let stored = persistence::save(action, checkpoint).run(&self.store).await?;
        if self.session.is_none() {
            self.session = stored;
        }
        Ok(())
    }
}
