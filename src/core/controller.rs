//! Pure command functions over [`SimulationState`].
//!
//! Every function takes the current state by reference and returns a new
//! state; nothing here holds on to a state or performs I/O. Drivers call
//! [`dispatch`] with a [`Command`], or the individual functions directly.

use super::command::{Command, Dispatched, Outcome};
use super::error::SimulationError;
use super::grid::Grid;
use super::pattern::Pattern;
use super::state::SimulationState;
use tracing::{debug, warn};

/// Apply one command.
///
/// Errors leave `state` untouched and are fatal to that command only. A
/// history gap is not an error: it is reported as [`Outcome::HistoryGap`]
/// with the state unchanged.
pub fn dispatch(state: &SimulationState, command: Command) -> Result<Dispatched, SimulationError> {
    debug!(command = command.name(), step = state.step, "dispatching command");

    let result = match command {
        Command::Load { grid, step } => Ok(load(state, grid, step)),
        Command::ToggleCell { x, y } => toggle_cell(state, x, y),
        Command::SetRows(rows) => set_rows(state, rows),
        Command::SetCols(cols) => set_cols(state, cols),
        Command::SetInterval(ms) => Ok(set_interval(state, ms)),
        Command::StepIn => Ok(step_in(state)),
        Command::StepOut => Ok(step_out(state)),
        Command::SetFromHistory { step } => Ok(set_from_history(state, step)),
        Command::PutPattern { x, y, pattern } => Ok(put_pattern(state, x, y, &pattern)),
    };

    if let Err(err) = &result {
        warn!(error = %err, "command rejected");
    }
    result
}

/// Replace grid and step wholesale. History is left as is.
pub fn load(state: &SimulationState, grid: Grid, step: u64) -> Dispatched {
    Dispatched::applied(SimulationState::from_parts(
        grid,
        step,
        state.interval_ms,
        state.history.clone(),
    ))
}

pub fn toggle_cell(
    state: &SimulationState,
    x: isize,
    y: isize,
) -> Result<Dispatched, SimulationError> {
    let grid = state.grid.toggle(x, y)?;
    Ok(Dispatched::applied(state.at(grid, state.step)))
}

/// Regenerate an empty grid with `rows` rows. Step and history are kept.
pub fn set_rows(state: &SimulationState, rows: usize) -> Result<Dispatched, SimulationError> {
    resize(state, rows, state.cols)
}

/// Regenerate an empty grid with `cols` columns. Step and history are kept.
pub fn set_cols(state: &SimulationState, cols: usize) -> Result<Dispatched, SimulationError> {
    resize(state, state.rows, cols)
}

fn resize(
    state: &SimulationState,
    rows: usize,
    cols: usize,
) -> Result<Dispatched, SimulationError> {
    let grid = state.grid.resize(rows, cols)?;
    Ok(Dispatched::applied(SimulationState {
        rows,
        cols,
        ..state.at(grid, state.step)
    }))
}

/// Store the tick interval. Any value is accepted; schedulers decide what a
/// zero interval means.
pub fn set_interval(state: &SimulationState, interval_ms: u64) -> Dispatched {
    Dispatched::applied(SimulationState {
        interval_ms,
        ..state.clone()
    })
}

/// Advance exactly one step.
///
/// When the ledger already holds `step + 1` that snapshot is restored.
/// Otherwise the next generation is computed and recorded at `step + 1`.
/// The origin grid is recorded first if its own step is missing, so a
/// following step-out can return to it. At `u64::MAX` the state is returned
/// unchanged with [`Outcome::AtLimit`].
pub fn step_in(state: &SimulationState) -> Dispatched {
    let Some(next_step) = state.step.checked_add(1) else {
        warn!(step = state.step, "step counter exhausted");
        return Dispatched {
            state: state.clone(),
            outcome: Outcome::AtLimit,
        };
    };

    if let Some(grid) = state.history.grid_at(next_step) {
        debug!(step = next_step, "replaying recorded generation");
        return Dispatched {
            state: state.at(grid.clone(), next_step),
            outcome: Outcome::Replayed { step: next_step },
        };
    }

    let history = if state.history.contains(state.step) {
        state.history.clone()
    } else {
        state.history.record(state.step, state.grid.clone())
    };
    let grid = state.grid.next_generation();
    let history = history.record(next_step, grid.clone());

    debug!(
        step = next_step,
        population = grid.population(),
        "computed generation"
    );
    Dispatched {
        state: SimulationState {
            history,
            ..state.at(grid, next_step)
        },
        outcome: Outcome::Computed { step: next_step },
    }
}

/// Go back one step through the ledger.
///
/// At step 0 this is a no-op. If the previous step was evicted the state is
/// returned unchanged with [`Outcome::HistoryGap`].
pub fn step_out(state: &SimulationState) -> Dispatched {
    let Some(prev_step) = state.step.checked_sub(1) else {
        return Dispatched {
            state: state.clone(),
            outcome: Outcome::AtOrigin,
        };
    };
    restore(state, prev_step)
}

/// Jump straight to a recorded step. Unknown steps leave the state unchanged.
pub fn set_from_history(state: &SimulationState, step: u64) -> Dispatched {
    restore(state, step)
}

fn restore(state: &SimulationState, step: u64) -> Dispatched {
    match state.history.grid_at(step) {
        Some(grid) => {
            debug!(step, "restored recorded generation");
            Dispatched {
                state: state.at(grid.clone(), step),
                outcome: Outcome::Replayed { step },
            }
        }
        None => {
            warn!(
                step,
                oldest = ?state.history.oldest_step(),
                "step not in history"
            );
            Dispatched {
                state: state.clone(),
                outcome: Outcome::HistoryGap { step },
            }
        }
    }
}

/// Stamp `pattern` with its top-left corner at column `x`, row `y`.
pub fn put_pattern(state: &SimulationState, x: isize, y: isize, pattern: &Pattern) -> Dispatched {
    let grid = pattern.apply(&state.grid, x, y);
    Dispatched::applied(state.at(grid, state.step))
}
