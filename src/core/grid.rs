//! The cell grid and its transition function.
//!
//! Grids are value objects: every operation that changes cells returns a new
//! grid and leaves its input untouched, which keeps history snapshots valid.

use super::error::SimulationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary state of a single cell.
///
/// Serialized as the integer `0` (dead) or `1` (alive), so a grid exports as
/// a plain binary matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }

    /// The opposite state.
    pub fn toggled(self) -> Self {
        match self {
            Self::Dead => Self::Alive,
            Self::Alive => Self::Dead,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Self::Alive
        } else {
            Self::Dead
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Dead => 0,
            Cell::Alive => 1,
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = SimulationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Dead),
            1 => Ok(Self::Alive),
            other => Err(SimulationError::InvalidCell(other)),
        }
    }
}

/// Rectangular matrix of cells, indexed by `(row, col)`.
///
/// Invariant: at least 1x1, and every row holds exactly `cols` cells.
/// Deserialization goes through [`Grid::from_rows`], so a stored matrix that
/// breaks the invariant is rejected.
///
/// # Example
///
/// ```rust
/// use cellsim::core::Grid;
///
/// let grid = Grid::empty(3, 3).unwrap();
/// let grid = grid.toggle(1, 0).unwrap();
/// let grid = grid.toggle(1, 1).unwrap();
/// let grid = grid.toggle(1, 2).unwrap();
///
/// // Horizontal blinker turns vertical.
/// let next = grid.next_generation();
/// assert_eq!(next.live_cells(), vec![(0, 1), (1, 1), (2, 1)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create an all-dead grid.
    pub fn empty(rows: usize, cols: usize) -> Result<Self, SimulationError> {
        if rows < 1 || cols < 1 {
            return Err(SimulationError::InvalidDimension { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![vec![Cell::Dead; cols]; rows],
        })
    }

    /// Build a grid from a matrix of rows, validating its shape.
    pub fn from_rows(cells: Vec<Vec<Cell>>) -> Result<Self, SimulationError> {
        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);
        if rows < 1 || cols < 1 {
            return Err(SimulationError::InvalidDimension { rows, cols });
        }
        if let Some((row, found)) = cells
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != cols)
        {
            return Err(SimulationError::RaggedRows {
                row,
                expected: cols,
                found,
            });
        }
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at `(row, col)`, or `None` when outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(Cell::is_alive)
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_alive())
            .count()
    }

    /// Coordinates of every live cell in row-major order.
    pub fn live_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .filter(|(_, cell)| cell.is_alive())
                    .map(move |(col, _)| (row, col))
            })
            .collect()
    }

    pub fn as_rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// Flip the cell at row `x`, column `y`.
    ///
    /// Coordinates are signed so that callers passing raw pointer math get an
    /// `OutOfBounds` error instead of a wrap-around.
    pub fn toggle(&self, x: isize, y: isize) -> Result<Self, SimulationError> {
        let (row, col) = self.checked_index(x, y)?;
        let mut next = self.clone();
        next.cells[row][col] = next.cells[row][col].toggled();
        Ok(next)
    }

    /// Compute the successor grid under B3/S23.
    ///
    /// Topology is bounded: neighbors outside the grid count as dead.
    pub fn next_generation(&self) -> Self {
        let cells = (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| {
                        let alive = self.cells[row][col].is_alive();
                        match (alive, self.live_neighbors(row, col)) {
                            (true, 2) | (true, 3) => Cell::Alive,
                            (false, 3) => Cell::Alive,
                            _ => Cell::Dead,
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    /// Fresh empty grid of the new dimensions. Content is discarded.
    pub fn resize(&self, rows: usize, cols: usize) -> Result<Self, SimulationError> {
        Self::empty(rows, cols)
    }

    /// Count of live cells among the 8 surrounding positions.
    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;
        for dr in -1isize..=1 {
            for dc in -1isize..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
                else {
                    continue;
                };
                if self.is_alive(r, c) {
                    count += 1;
                }
            }
        }
        count
    }

    pub(crate) fn set_alive(&mut self, row: usize, col: usize) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = Cell::Alive;
        }
    }

    fn checked_index(&self, x: isize, y: isize) -> Result<(usize, usize), SimulationError> {
        let out_of_bounds = || SimulationError::OutOfBounds {
            x,
            y,
            rows: self.rows,
            cols: self.cols,
        };
        let row = usize::try_from(x).map_err(|_| out_of_bounds())?;
        let col = usize::try_from(y).map_err(|_| out_of_bounds())?;
        if row >= self.rows || col >= self.cols {
            return Err(out_of_bounds());
        }
        Ok((row, col))
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Grid {
    type Error = SimulationError;

    fn try_from(cells: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        Self::from_rows(cells)
    }
}

impl From<Grid> for Vec<Vec<Cell>> {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

/// Renders `O` for live cells and `.` for dead ones, one line per row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                f.write_str(if cell.is_alive() { "O" } else { "." })?;
            }
        }
        Ok(())
    }
}
