//! Cellsim: the simulation-and-history engine of a Game of Life sandbox
//!
//! Cellsim follows a "pure core, imperative shell" layout. The core owns the
//! grid, its B3/S23 transition, pattern stamps and a bounded history ledger,
//! all as pure functions over immutable values. The shell drives that core:
//! it holds the live state, runs the auto-step loop and talks to storage
//! through effects.
//!
//! # Core Concepts
//!
//! - **Grid**: Rectangular binary matrix with bounded (non-wrapping) edges
//! - **Pattern**: Named stamp unioned onto a grid at an offset
//! - **History**: Step-indexed snapshots for replay without recomputation
//! - **Controller**: Pure command functions from state to new state
//! - **Driver**: Owner of the live state, auto-step loop and autosave
//!
//! # Example
//!
//! ```rust
//! use cellsim::core::{catalog, controller, Command, Outcome, SimulationState};
//!
//! let state = SimulationState::new(10, 10).unwrap();
//! let glider = catalog::find("Glider").unwrap();
//!
//! let state = controller::dispatch(&state, Command::PutPattern { x: 1, y: 1, pattern: glider })
//!     .unwrap()
//!     .state;
//! let forward = controller::dispatch(&state, Command::StepIn).unwrap();
//! assert_eq!(forward.outcome, Outcome::Computed { step: 1 });
//!
//! let back = controller::dispatch(&forward.state, Command::StepOut).unwrap();
//! assert_eq!(back.state.grid(), state.grid());
//! ```

pub mod checkpoint;
pub mod config;
pub mod core;
pub mod driver;
pub mod persistence;

// Re-export commonly used types
pub use crate::core::{Cell, Command, Grid, HistoryLedger, Outcome, Pattern, SimulationState};
pub use driver::{Driver, RunHandle};
