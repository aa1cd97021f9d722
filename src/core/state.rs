//! Aggregate simulation state.

use super::error::SimulationError;
use super::grid::Grid;
use super::history::HistoryLedger;
use serde::{Deserialize, Serialize};

/// Default tick interval used by external schedulers.
pub const DEFAULT_INTERVAL_MS: u64 = 650;

/// Everything the controller owns: grid, step counter, dimensions, tick
/// interval and history.
///
/// States are values. Controller commands take a state by reference and
/// return a new one, so a driver can keep older states around without them
/// changing underneath it.
///
/// # Example
///
/// ```rust
/// use cellsim::core::{controller, SimulationState};
///
/// let state = SimulationState::new(20, 20).unwrap();
/// let state = controller::step_in(&state).state;
///
/// assert_eq!(state.step(), 1);
/// assert!(state.history().contains(1));
/// ```
///
/// On deserialize the dimensions are recomputed from the grid; any stored
/// `rows`/`cols` are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawState")]
pub struct SimulationState {
    pub(super) grid: Grid,
    pub(super) step: u64,
    pub(super) rows: usize,
    pub(super) cols: usize,
    pub(super) interval_ms: u64,
    pub(super) history: HistoryLedger,
}

#[derive(Deserialize)]
struct RawState {
    grid: Grid,
    step: u64,
    interval_ms: u64,
    history: HistoryLedger,
}

impl From<RawState> for SimulationState {
    fn from(raw: RawState) -> Self {
        Self::from_parts(raw.grid, raw.step, raw.interval_ms, raw.history)
    }
}

impl SimulationState {
    /// Empty grid at step 0 with the default interval and history capacity.
    pub fn new(rows: usize, cols: usize) -> Result<Self, SimulationError> {
        Ok(Self::from_parts(
            Grid::empty(rows, cols)?,
            0,
            DEFAULT_INTERVAL_MS,
            HistoryLedger::default(),
        ))
    }

    /// Assemble a state from its parts. Dimensions are taken from the grid.
    pub fn from_parts(grid: Grid, step: u64, interval_ms: u64, history: HistoryLedger) -> Self {
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            grid,
            step,
            interval_ms,
            history,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    /// Same state with a different grid and step.
    pub(super) fn at(&self, grid: Grid, step: u64) -> Self {
        Self {
            grid,
            step,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::controller;

    #[test]
    fn new_state_starts_at_step_zero() {
        let state = SimulationState::new(4, 6).unwrap();

        assert_eq!(state.step(), 0);
        assert_eq!((state.rows(), state.cols()), (4, 6));
        assert_eq!(state.interval_ms(), DEFAULT_INTERVAL_MS);
        assert!(state.history().is_empty());
        assert_eq!(state.grid().population(), 0);
    }

    #[test]
    fn new_rejects_invalid_dimensions() {
        assert!(SimulationState::new(0, 3).is_err());
    }

    #[test]
    fn from_parts_takes_dimensions_from_grid() {
        let state = SimulationState::from_parts(
            Grid::empty(2, 9).unwrap(),
            12,
            100,
            HistoryLedger::new(4),
        );

        assert_eq!((state.rows(), state.cols()), (2, 9));
        assert_eq!(state.step(), 12);
        assert_eq!(state.history().capacity(), 4);
    }

    #[test]
    fn state_serializes_correctly() {
        let state = SimulationState::new(3, 3).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: SimulationState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }

    #[test]
    fn deserialized_dimensions_follow_the_grid() {
        let json = r#"{
            "grid": [[0, 1]],
            "step": 3,
            "rows": 5,
            "cols": 5,
            "interval_ms": 650,
            "history": {"capacity": 30, "entries": []}
        }"#;
        let state: SimulationState = serde_json::from_str(json).unwrap();

        assert_eq!((state.rows(), state.cols()), (1, 2));
        let taller = controller::set_rows(&state, 3).unwrap().state;
        assert_eq!((taller.grid().rows(), taller.grid().cols()), (3, 2));
    }

    #[test]
    fn zero_capacity_history_still_steps() {
        let json = r#"{
            "grid": [[0]],
            "step": 0,
            "rows": 1,
            "cols": 1,
            "interval_ms": 650,
            "history": {"capacity": 0, "entries": []}
        }"#;
        let state: SimulationState = serde_json::from_str(json).unwrap();

        let next = controller::step_in(&state).state;
        assert_eq!(next.step(), 1);
        assert_eq!(next.history().steps(), vec![1]);
    }
}
