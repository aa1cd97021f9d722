//! Core simulation types and logic.
//!
//! This module contains the pure functional core of the sandbox:
//! - `Grid` and its B3/S23 transition function
//! - `Pattern` stamps and the built-in catalog
//! - The bounded `HistoryLedger`
//! - `SimulationState` plus the command functions in `controller`
//!
//! All logic in this module is pure (no side effects, no I/O, no timers).

pub mod catalog;
mod command;
pub mod controller;
mod error;
mod grid;
mod history;
mod pattern;
mod state;

pub use command::{Command, Dispatched, Outcome};
pub use error::SimulationError;
pub use grid::{Cell, Grid};
pub use history::{HistoryEntry, HistoryLedger, MAX_HISTORY};
pub use pattern::Pattern;
pub use state::{SimulationState, DEFAULT_INTERVAL_MS};
