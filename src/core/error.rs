//! Errors raised by the pure simulation core.

use thiserror::Error;

/// Errors that can occur when building or transforming grids and patterns.
///
/// Every variant is fatal to the call that produced it only; the state the
/// call was applied to is never modified.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// Grid dimensions must both be at least 1
    #[error("Invalid grid dimensions {rows}x{cols}, both must be at least 1")]
    InvalidDimension { rows: usize, cols: usize },

    /// Coordinate outside the grid extent
    #[error("Cell ({x}, {y}) is outside a {rows}x{cols} grid")]
    OutOfBounds {
        x: isize,
        y: isize,
        rows: usize,
        cols: usize,
    },

    /// Matrix rows do not all have the same length
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Patterns must contain at least one cell
    #[error("Pattern '{name}' is empty")]
    EmptyPattern { name: String },

    /// Cell values are binary
    #[error("Invalid cell value {0}, expected 0 or 1")]
    InvalidCell(u8),

    /// Pattern text may only contain `O`, `*` and `.`
    #[error("Invalid pattern glyph '{0}'")]
    InvalidGlyph(char),
}
