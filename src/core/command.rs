//! Commands accepted by the controller and the outcomes they report.

use super::grid::Grid;
use super::pattern::Pattern;
use super::state::SimulationState;
use serde::{Deserialize, Serialize};

/// The controller's inbound mutation surface.
///
/// Serialized as `{"type": "...", "payload": ...}` so a driver can queue or
/// log commands in a transport-neutral form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum Command {
    /// Replace grid and step wholesale, bypassing history
    Load { grid: Grid, step: u64 },
    /// Flip the cell at row `x`, column `y`
    ToggleCell { x: isize, y: isize },
    /// Regenerate an empty grid with a new row count
    SetRows(usize),
    /// Regenerate an empty grid with a new column count
    SetCols(usize),
    /// Update the tick interval used by the external scheduler
    SetInterval(u64),
    /// Advance one generation, replaying history when available
    StepIn,
    /// Go back one generation through history
    StepOut,
    /// Jump directly to a recorded step
    SetFromHistory { step: u64 },
    /// Stamp a pattern with its top-left corner at column `x`, row `y`
    PutPattern { x: isize, y: isize, pattern: Pattern },
}

impl Command {
    /// Stable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Load { .. } => "load",
            Self::ToggleCell { .. } => "toggle-cell",
            Self::SetRows(_) => "set-rows",
            Self::SetCols(_) => "set-cols",
            Self::SetInterval(_) => "set-interval",
            Self::StepIn => "step-in",
            Self::StepOut => "step-out",
            Self::SetFromHistory { .. } => "set-from-history",
            Self::PutPattern { .. } => "put-pattern",
        }
    }
}

/// What a command did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Command took effect without moving through history
    Applied,
    /// A new generation was computed and recorded
    Computed { step: u64 },
    /// A recorded generation was restored
    Replayed { step: u64 },
    /// The target step is not in the ledger; state unchanged
    HistoryGap { step: u64 },
    /// Step-out at step 0; state unchanged
    AtOrigin,
    /// Step-in at `u64::MAX`; state unchanged
    AtLimit,
}

/// New state produced by a command, together with its outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatched {
    pub state: SimulationState,
    pub outcome: Outcome,
}

impl Dispatched {
    pub(super) fn applied(state: SimulationState) -> Self {
        Self {
            state,
            outcome: Outcome::Applied,
        }
    }

    pub fn into_state(self) -> SimulationState {
        self.state
    }
}
